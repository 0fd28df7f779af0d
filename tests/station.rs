mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_strip_station::{
        ChangeOutcome, ChannelState, ChannelTarget, CommandQueue, Effect, EffectFactory,
        ErrorReporter, FactoryError, Link, NO_EFFECT_NAME, OutputDriver, OutputError, Station, StationCommand, StationConfig,
        StatusError,
        clock::FrameClock,
        color::{Rgb, rgb_from_u32},
        config::ChannelConfig,
        effect::RenderContext,
        factory::EffectRequest,
        manager::ChannelManager,
        parse_brightness_payload,
    };
    use rand::{SeedableRng, rngs::SmallRng};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const IDLE_GREEN: Rgb = rgb_from_u32(0x00_8000);
    const WIFI_ORANGE: Rgb = rgb_from_u32(0xFF_A500);

    const RED_ON_FIRST: &str = r#"{"name":"SolidFill","red":255,"green":0,"blue":0,"channel":0}"#;

    #[derive(Default)]
    struct RecordingOutput {
        frames: Vec<(usize, Vec<Rgb>, u8)>,
        failing: bool,
    }

    impl RecordingOutput {
        fn last_frame(&self, channel: usize) -> Option<&(usize, Vec<Rgb>, u8)> {
            self.frames.iter().rev().find(|(index, _, _)| *index == channel)
        }

        fn writes_to(&self, channel: usize) -> usize {
            self.frames.iter().filter(|(index, _, _)| *index == channel).count()
        }
    }

    impl OutputDriver for RecordingOutput {
        fn write(&mut self, channel: usize, colors: &[Rgb], brightness: u8) -> Result<(), OutputError> {
            if self.failing {
                return Err(OutputError::Transfer);
            }
            self.frames.push((channel, colors.to_vec(), brightness));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reports: Vec<String>,
    }

    impl ErrorReporter for RecordingReporter {
        fn report_error(&mut self, text: &str) {
            self.reports.push(text.to_string());
        }
    }

    type TestStation = Station<RecordingOutput, RecordingReporter>;

    fn station_with(config: StationConfig) -> TestStation {
        Station::new(
            &config,
            RecordingOutput::default(),
            RecordingReporter::default(),
            Instant::from_millis(0),
        )
    }

    fn station() -> TestStation {
        let mut config = StationConfig::uniform(2, 9);
        config.error_display = Duration::from_secs(1);
        station_with(config)
    }

    fn status_pattern(color: Rgb, len: usize) -> Vec<Rgb> {
        (0..len).map(|i| if i % 3 == 0 { color } else { BLACK }).collect()
    }

    #[test_log::test]
    fn test_targeted_effect_only_changes_one_channel() {
        let mut station = station();
        station.change_effect(RED_ON_FIRST.as_bytes());

        assert_eq!(station.current_effect_name(0), Some("Solid Fill Effect"));
        assert_eq!(station.current_effect_name(1), Some(NO_EFFECT_NAME));
        assert_eq!(station.reporter().reports, [""]);

        station.tick(Instant::from_millis(20));
        let (_, frame, _) = station.output().last_frame(0).unwrap();
        assert!(frame.iter().all(|led| *led == RED));
        let (_, idle, _) = station.output().last_frame(1).unwrap();
        assert_eq!(*idle, status_pattern(IDLE_GREEN, 9));
    }

    #[test]
    fn test_broadcast_gives_every_channel_an_effect() {
        let mut station = station();
        station.change_effect(br#"{"name":"Marquee"}"#);
        assert_eq!(station.current_effect_name(0), Some("Marquee Effect"));
        assert_eq!(station.current_effect_name(1), Some("Marquee Effect"));

        station.change_effect(br#"{"name":"BulgarianFlag","channel":1}"#);
        assert_eq!(station.current_effect_name(0), Some("Marquee Effect"));
        assert_eq!(station.current_effect_name(1), Some("Bulgarian Flag Effect"));
        assert_eq!(station.channel(1).map(ChannelManager::state), Some(ChannelState::EffectActive));
    }

    #[test]
    fn test_failed_change_keeps_effect_until_error_expires() {
        let mut station = station();
        station.change_effect(br#"{"name":"Marquee"}"#);
        station.change_effect(br#"{"name":"DoesNotExist"}"#);

        for index in 0..2 {
            assert_eq!(station.current_effect_name(index), Some("Marquee Effect"));
            let channel = station.channel(index).unwrap();
            assert_eq!(channel.error(), StatusError::General);
            assert_eq!(channel.state(), ChannelState::ErrorOverlay);
        }
        let reports = &station.reporter().reports;
        assert_eq!(reports.len(), 4);
        assert!(reports[2].contains("does not exist"));

        station.tick(Instant::from_millis(500));
        let (_, frame, _) = station.output().last_frame(0).unwrap();
        assert_eq!(*frame, status_pattern(StatusError::General.color(), 9));
        assert_eq!(station.channel(0).unwrap().error(), StatusError::General);

        station.tick(Instant::from_millis(1000));
        assert_eq!(station.channel(0).unwrap().error(), StatusError::None);
        assert_eq!(
            station.channel(0).map(ChannelManager::state),
            Some(ChannelState::EffectActive)
        );
    }

    #[test]
    fn test_success_clears_general_error() {
        let mut station = station();
        station.change_effect(br#"{"name":"DoesNotExist"}"#);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::General);

        station.change_effect(br#"{"name":"SolidFill"}"#);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::None);
        assert_eq!(station.reporter().reports.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_failure_for_other_channel_is_ignored() {
        let mut station = station();
        station.change_effect(br#"{"name":"Nope","channel":1}"#);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::None);
        assert_eq!(station.channel(1).unwrap().error(), StatusError::General);
        assert_eq!(station.reporter().reports.len(), 1);
    }

    #[test]
    fn test_link_errors_by_specificity() {
        let mut station = station();
        station.on_link_status_changed(Link::Network, false);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::Wifi);

        station.on_link_status_changed(Link::Messaging, false);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::Wifi);

        // A rejected request does not mask a link outage
        station.change_effect(br#"{"name":"DoesNotExist"}"#);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::Wifi);

        station.tick(Instant::from_millis(20));
        let (_, frame, _) = station.output().last_frame(1).unwrap();
        assert_eq!(*frame, status_pattern(WIFI_ORANGE, 9));

        station.on_link_status_changed(Link::Messaging, true);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::Wifi);

        station.on_link_status_changed(Link::Network, true);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::None);
    }

    #[test]
    fn test_network_recovery_reveals_messaging_outage() {
        let mut station = station();
        station.on_link_status_changed(Link::Messaging, false);
        assert_eq!(station.channel(1).unwrap().error(), StatusError::Messaging);
        station.on_link_status_changed(Link::Network, false);
        station.on_link_status_changed(Link::Network, true);
        assert_eq!(station.channel(1).unwrap().error(), StatusError::Messaging);
    }

    #[test]
    fn test_disable_blanks_and_stops_drawing() {
        let mut station = station();
        station.change_effect(br#"{"name":"SolidFill"}"#);
        station.tick(Instant::from_millis(20));

        assert!(station.set_enabled(1, false));
        assert!(!station.is_enabled(1));
        let (_, frame, _) = station.output().last_frame(1).unwrap();
        assert!(frame.iter().all(|led| *led == BLACK));

        let writes = station.output().writes_to(1);
        station.tick(Instant::from_millis(40));
        assert_eq!(station.output().writes_to(1), writes);
        assert_eq!(station.output().writes_to(0), 2);

        assert!(station.set_enabled(1, true));
        station.tick(Instant::from_millis(60));
        assert_eq!(station.output().writes_to(1), writes + 1);

        assert!(!station.set_enabled(7, false));
    }

    #[test]
    fn test_brightness_is_applied_at_flush() {
        let mut station = station();
        station.set_brightness(ChannelTarget::Channel(1), 40);
        station.tick(Instant::from_millis(20));
        assert_eq!(station.output().last_frame(0).map(|frame| frame.2), Some(255));
        assert_eq!(station.output().last_frame(1).map(|frame| frame.2), Some(40));

        station.set_brightness(ChannelTarget::All, 10);
        station.set_brightness(ChannelTarget::Channel(5), 99);
        assert_eq!(station.current_brightness(0), Some(10));
        assert_eq!(station.current_brightness(1), Some(10));
        assert_eq!(station.current_brightness(5), None);
    }

    #[test]
    fn test_flush_failures_are_counted() {
        let mut station = station();
        station.output_mut().failing = true;
        station.tick(Instant::from_millis(20));
        station.tick(Instant::from_millis(40));
        assert_eq!(station.flush_failures(), 4);

        station.output_mut().failing = false;
        station.tick(Instant::from_millis(60));
        assert_eq!(station.flush_failures(), 4);
    }

    #[test]
    fn test_status_json() {
        let mut station = station();
        station.change_effect(RED_ON_FIRST.as_bytes());
        station.set_enabled(1, false);

        let mut buf = [0u8; 256];
        let len = station.write_status(&mut buf).unwrap();
        assert_eq!(
            core::str::from_utf8(&buf[..len]).unwrap(),
            r#"{"channels":[{"effect":"Solid Fill Effect","brightness":255,"enabled":true},{"effect":"No Effect Playing","brightness":255,"enabled":false}]}"#
        );

        let mut tiny = [0u8; 8];
        assert!(station.write_status(&mut tiny).is_err());
    }

    #[test]
    fn test_commands_are_drained_in_order() {
        static QUEUE: CommandQueue<4> = CommandQueue::new();

        let mut station = station();
        let (target, brightness) = parse_brightness_payload("2128").unwrap();
        QUEUE
            .try_push(StationCommand::ChangeEffect(r#"{"name":"Marquee"}"#.to_string()))
            .unwrap();
        QUEUE
            .try_push(StationCommand::SetBrightness(target, brightness))
            .unwrap();
        QUEUE.try_push(StationCommand::Enable(0, false)).unwrap();
        QUEUE
            .try_push(StationCommand::LinkStatus(Link::Messaging, false))
            .unwrap();
        assert!(QUEUE.try_push(StationCommand::Enable(0, true)).is_err());

        assert_eq!(station.process_commands(&QUEUE), 4);
        assert!(QUEUE.is_empty());
        assert_eq!(station.current_effect_name(1), Some("Marquee Effect"));
        assert_eq!(station.current_brightness(1), Some(128));
        assert_eq!(station.current_brightness(0), Some(255));
        assert!(!station.is_enabled(0));
        assert_eq!(station.channel(1).unwrap().error(), StatusError::Messaging);
    }

    #[test]
    fn test_channels_follow_config() {
        let config = StationConfig {
            channels: vec![
                ChannelConfig::new(3),
                ChannelConfig {
                    led_count: 5,
                    brightness: 80,
                    enabled: false,
                },
            ],
            ..StationConfig::default()
        };
        let mut station = station_with(config);
        assert_eq!(station.channels().len(), 2);
        assert_eq!(station.channel(1).map(|c| c.leds().len()), Some(5));
        assert_eq!(station.current_brightness(1), Some(80));

        station.tick(Instant::from_millis(20));
        assert_eq!(station.output().writes_to(0), 1);
        assert_eq!(station.output().writes_to(1), 0);
    }

    #[test]
    fn test_manager_swaps_effects_in_place() {
        let mut factory = EffectFactory::new();
        let clock = FrameClock::new(Instant::from_millis(0));
        let mut rng = SmallRng::seed_from_u64(3);
        let mut ctx = RenderContext::new(&clock, &mut rng);
        let mut reporter = RecordingReporter::default();
        let mut manager = ChannelManager::new(1, &ChannelConfig::new(6), Duration::from_secs(30));

        assert_eq!(manager.state(), ChannelState::NoEffect);
        assert_eq!(
            manager.change_effect(br#"{"name":"SolidFill"}"#, &mut factory, &mut ctx, &mut reporter),
            ChangeOutcome::Applied
        );
        assert_eq!(
            manager.change_effect(RED_ON_FIRST.as_bytes(), &mut factory, &mut ctx, &mut reporter),
            ChangeOutcome::Ignored
        );
        assert_eq!(
            manager.change_effect(br#"{"name":"TwinkleEffect"}"#, &mut factory, &mut ctx, &mut reporter),
            ChangeOutcome::Applied
        );
        assert_eq!(manager.current_effect_name(), "Twinkle Effect");
        assert_eq!(
            manager.change_effect(b"{", &mut factory, &mut ctx, &mut reporter),
            ChangeOutcome::Failed
        );
        assert_eq!(manager.current_effect_name(), "Twinkle Effect");
        assert_eq!(reporter.reports.len(), 3);
    }

    thread_local! {
        static LIFECYCLE: std::cell::RefCell<Vec<String>> = const { std::cell::RefCell::new(Vec::new()) };
        static NEXT_ID: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
    }

    fn lifecycle() -> Vec<String> {
        LIFECYCLE.with(|events| events.borrow().clone())
    }

    fn record(event: String) {
        LIFECYCLE.with(|events| events.borrow_mut().push(event));
    }

    /// Logs when it is initialized and when it is dropped
    struct TrackedEffect {
        id: usize,
    }

    impl Effect for TrackedEffect {
        fn init(&mut self, _leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
            record(format!("init {}", self.id));
        }

        fn draw(&mut self, leds: &mut [Rgb], _ctx: &mut RenderContext<'_>) {
            leds.fill(RED);
        }

        fn friendly_name(&self) -> &str {
            "Tracked"
        }
    }

    impl Drop for TrackedEffect {
        fn drop(&mut self) {
            record(format!("drop {}", self.id));
        }
    }

    fn tracked(_: &EffectRequest<'_>) -> Result<Box<dyn Effect>, FactoryError> {
        let id = NEXT_ID.with(|next| next.replace(next.get() + 1));
        Ok(Box::new(TrackedEffect { id }) as Box<dyn Effect>)
    }

    #[test]
    fn test_old_effect_is_dropped_before_new_one_starts() {
        let mut factory = EffectFactory::new();
        factory.register("Tracked", tracked);
        let clock = FrameClock::new(Instant::from_millis(0));
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ctx = RenderContext::new(&clock, &mut rng);
        let mut reporter = RecordingReporter::default();
        let mut manager = ChannelManager::new(0, &ChannelConfig::new(4), Duration::from_secs(30));

        for _ in 0..2 {
            assert_eq!(
                manager.change_effect(br#"{"name":"Tracked"}"#, &mut factory, &mut ctx, &mut reporter),
                ChangeOutcome::Applied
            );
        }
        assert_eq!(lifecycle(), ["init 0", "drop 0", "init 1"]);

        assert_eq!(
            manager.change_effect(br#"{"name":"Nope"}"#, &mut factory, &mut ctx, &mut reporter),
            ChangeOutcome::Failed
        );
        assert_eq!(lifecycle().len(), 3);

        // Built for channel 2, so only the temporary instance goes away
        assert_eq!(
            manager.change_effect(
                br#"{"name":"Tracked","channel":2}"#,
                &mut factory,
                &mut ctx,
                &mut reporter
            ),
            ChangeOutcome::Ignored
        );
        assert_eq!(lifecycle()[3..], ["drop 2"]);
        assert_eq!(manager.current_effect_name(), "Tracked");

        drop(manager);
        assert_eq!(lifecycle().last().map(String::as_str), Some("drop 1"));
    }

    #[test_log::test]
    fn test_endless_error_display_never_expires() {
        let mut config = StationConfig::uniform(1, 6);
        config.error_display = Duration::MAX;
        let mut station = station_with(config);
        station.tick(Instant::from_millis(20));
        station.change_effect(br#"{"name":"DoesNotExist"}"#);

        station.tick(Instant::from_secs(3600));
        station.tick(Instant::MAX);
        assert_eq!(station.channel(0).unwrap().error(), StatusError::General);
        let (_, frame, _) = station.output().last_frame(0).unwrap();
        assert_eq!(*frame, status_pattern(StatusError::General.color(), 6));
    }
}
