//! Remote commands and the queue that carries them to the render loop.
//!
//! Messaging callbacks (tasks, interrupts) push commands; the render loop
//! drains them between ticks with [`Station::process_commands`].
//!
//! [`Station::process_commands`]: crate::Station::process_commands

use alloc::string::String;
use core::{cell::RefCell, fmt};

use critical_section::Mutex;
use heapless::Deque;

use crate::factory::ChannelTarget;

/// Brightness payloads encode the channel in the thousands
const CHANNEL_STRIDE: u32 = 1000;

/// Upstream link whose state is mirrored on the status overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Network,
    Messaging,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationCommand {
    /// Raw JSON effect request, forwarded to every channel
    ChangeEffect(String),
    SetBrightness(ChannelTarget, u8),
    LinkStatus(Link, bool),
    /// Enable or disable a channel by index
    Enable(usize, bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Payload is not an unsigned decimal number
    Malformed,
    /// Brightness part is above 255
    OutOfRange(u32),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "brightness payload is not a number"),
            Self::OutOfRange(value) => write!(f, "brightness {} is out of range", value),
        }
    }
}

impl core::error::Error for CommandError {}

/// Decode a brightness payload of the form `channel * 1000 + value`.
///
/// Channel 0 addresses every channel, channels from 1 upwards address a
/// single channel by one-based index.
///
/// ```
/// use myrtio_strip_station::{ChannelTarget, command::parse_brightness_payload};
///
/// assert_eq!(parse_brightness_payload("128"), Ok((ChannelTarget::All, 128)));
/// assert_eq!(parse_brightness_payload("2040"), Ok((ChannelTarget::Channel(1), 40)));
/// ```
pub fn parse_brightness_payload(text: &str) -> Result<(ChannelTarget, u8), CommandError> {
    let raw: u32 = text.trim().parse().map_err(|_| CommandError::Malformed)?;
    let channel = raw / CHANNEL_STRIDE;
    let value = raw % CHANNEL_STRIDE;
    let value = u8::try_from(value).map_err(|_| CommandError::OutOfRange(value))?;

    let target = match channel {
        0 => ChannelTarget::All,
        one_based => ChannelTarget::Channel(one_based as usize - 1),
    };
    Ok((target, value))
}

/// Returned by [`CommandQueue::try_push`] when the queue is full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFull(pub StationCommand);

/// Bounded queue of pending commands.
///
/// Backed by a fixed-size `heapless::Deque` guarded by a critical section,
/// so it can live in a `static` and be fed from interrupt context.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<StationCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Enqueue a command, handing it back if the queue is full
    pub fn try_push(&self, command: StationCommand) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(QueueFull)
        })
    }

    /// Oldest pending command
    pub fn try_pop(&self) -> Option<StationCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
