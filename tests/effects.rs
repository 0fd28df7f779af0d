mod tests {
    use embassy_time::Instant;
    use myrtio_strip_station::{
        clock::FrameClock,
        color::{Rgb, palette_by_name, rgb_from_u32},
        effect::{
            BulgarianFlagEffect, ColorFillEffect, Effect, MarqueeEffect, PaletteEffect,
            RainbowFillEffect, RainbowStyle, RenderContext, STAR_PRESETS, StarKind,
            StarryNightConfig, StarryNightEffect, StatusEffect, StatusError, TwinkleEffect,
        },
    };
    use rand::{SeedableRng, rngs::SmallRng};

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Draws `effect` once per `frame_ms` for `frames` frames starting at t=0
    fn run(effect: &mut dyn Effect, leds: &mut [Rgb], frames: u64, frame_ms: u64) -> FrameClock {
        let mut clock = FrameClock::new(Instant::from_millis(0));
        let mut rng = SmallRng::seed_from_u64(42);
        effect.init(leds, &mut RenderContext::new(&clock, &mut rng));
        for frame in 1..=frames {
            clock.advance(Instant::from_millis(frame * frame_ms));
            effect.draw(leds, &mut RenderContext::new(&clock, &mut rng));
        }
        clock
    }

    #[test]
    fn test_bulgarian_flag_thirds() {
        let white = WHITE;
        let green = rgb_from_u32(0x00_9B49);
        let red = rgb_from_u32(0xD6_2612);

        let mut leds = [BLACK; 10];
        run(&mut BulgarianFlagEffect::new(false), &mut leds, 1, 20);
        assert_eq!(
            leds,
            [white, white, white, green, green, green, red, red, red, BLACK]
        );

        run(&mut BulgarianFlagEffect::new(true), &mut leds, 1, 20);
        assert_eq!(leds[0], red);
        assert_eq!(leds[8], white);

        let mut short = [WHITE; 2];
        run(&mut BulgarianFlagEffect::new(false), &mut short, 1, 20);
        assert_eq!(short, [BLACK; 2]);
    }

    #[test]
    fn test_color_fill_every_nth() {
        let amber = Rgb::new(246, 200, 160);
        let mut leds = [WHITE; 5];
        run(&mut ColorFillEffect::new(amber, 2), &mut leds, 1, 20);
        assert_eq!(leds, [amber, BLACK, amber, BLACK, amber]);
    }

    #[test]
    fn test_rainbow_hue_follows_elapsed_time() {
        let mut rainbow = RainbowFillEffect::new(RainbowStyle::Fill, 12.0, 14);
        let mut leds = [BLACK; 8];
        run(&mut rainbow, &mut leds, 1, 120);
        assert!((9..=10).contains(&rainbow.hue()), "hue {}", rainbow.hue());
        assert!(leds.iter().all(|led| *led != BLACK && *led != WHITE));
    }

    #[test]
    fn test_rainbow_twinkle_adds_one_sparkle() {
        let mut twinkle = RainbowFillEffect::new(RainbowStyle::Twinkle, 12.0, 14);
        let mut leds = [BLACK; 16];
        run(&mut twinkle, &mut leds, 3, 20);
        assert_eq!(leds.iter().filter(|led| **led == WHITE).count(), 1);
        assert_eq!(twinkle.friendly_name(), "RainbowTwinkle Effect");
    }

    #[test]
    fn test_marquee_gaps() {
        let mut leds = [BLACK; 12];
        run(&mut MarqueeEffect::new(false), &mut leds, 1, 20);
        for (i, led) in leds.iter().enumerate() {
            assert_eq!(*led == BLACK, i % 5 == 0, "pixel {i}");
        }

        let mut mirrored = [BLACK; 11];
        run(&mut MarqueeEffect::new(true), &mut mirrored, 7, 20);
        for i in 0..mirrored.len() {
            assert_eq!(mirrored[i], mirrored[mirrored.len() - 1 - i]);
        }
    }

    #[test]
    fn test_palette_effect_samples_palette() {
        let palette = palette_by_name("Heat").unwrap();
        let mut leds = [BLACK; 4];
        run(&mut PaletteEffect::new(palette, 16, 0.0), &mut leds, 2, 20);
        for (i, led) in leds.iter().enumerate() {
            assert_eq!(*led, palette.color_at(i as u8 * 16));
        }
    }

    #[test]
    fn test_twinkle_respects_count() {
        let mut twinkle = TwinkleEffect::new(3, 0.4, 0.6);
        let mut leds = [BLACK; 20];
        run(&mut twinkle, &mut leds, 30, 20);
        let lit = leds.iter().filter(|led| **led != BLACK).count();
        assert!(lit > 0 && lit <= 3, "{lit} pixels lit");
    }

    #[test]
    fn test_twinkle_defaults_to_half_the_strip() {
        let mut twinkle = TwinkleEffect::new(0, 5.0, 5.0);
        let mut leds = [BLACK; 8];
        run(&mut twinkle, &mut leds, 40, 20);
        let lit = leds.iter().filter(|led| **led != BLACK).count();
        assert!(lit <= 4, "{lit} pixels lit");
    }

    #[test]
    fn test_starry_night_stays_within_strip() {
        let config = StarryNightConfig::new(StarKind::Star, palette_by_name("RGB").unwrap());
        let mut stars = StarryNightEffect::new(config);
        assert_eq!(stars.friendly_name(), "Star StarryNightEffect");

        let mut leds = [BLACK; 20];
        run(&mut stars, &mut leds, 100, 20);
        assert!(stars.star_count() > 0);
        assert!(stars.star_count() <= leds.len());
        assert!(leds.iter().any(|led| *led != BLACK));
    }

    #[test]
    fn test_starry_night_zero_probability_stays_dark() {
        let mut config = StarryNightConfig::new(StarKind::QuietStar, palette_by_name("Blue").unwrap());
        config.probability = 0.0;
        let mut stars = StarryNightEffect::new(config);
        let mut leds = [WHITE; 10];
        run(&mut stars, &mut leds, 50, 20);
        assert_eq!(stars.star_count(), 0);
        assert_eq!(leds, [BLACK; 10]);
    }

    #[test]
    fn test_star_kinds_and_presets() {
        for kind in StarKind::ALL {
            assert_eq!(StarKind::parse_from_str(kind.as_str()), Some(kind));
            assert!(kind.lifetime().total() > 0.0);
        }
        assert_eq!(StarKind::parse_from_str("star"), None);

        for (i, preset) in STAR_PRESETS.iter().enumerate() {
            assert!(STAR_PRESETS[i + 1..].iter().all(|other| other.name != preset.name));
            assert!(!preset.keys.is_empty());
            assert!(
                STAR_PRESETS[i + 1..]
                    .iter()
                    .all(|other| other.keys.iter().all(|key| !preset.keys.contains(key)))
            );
            assert_eq!(StarryNightEffect::from_preset(preset).friendly_name(), preset.name);
        }
    }

    fn quiet_stars() -> StarryNightConfig {
        StarryNightConfig::new(StarKind::QuietStar, palette_by_name("RGB").unwrap())
    }

    #[test_log::test]
    fn test_giant_star_size_stays_on_strip() {
        let mut config = quiet_stars();
        config.probability = 50.0;
        config.star_size = 1e30;
        let mut stars = StarryNightEffect::new(config);
        assert_eq!(stars.config().star_size, 256.0);

        let mut leds = [BLACK; 8];
        run(&mut stars, &mut leds, 10, 20);
        assert!(stars.star_count() > 0);
        assert!(leds.iter().any(|led| *led != BLACK));
    }

    #[test_log::test]
    fn test_huge_max_speed_is_capped() {
        let mut config = quiet_stars();
        config.probability = 50.0;
        config.max_speed = 3e38;
        let mut stars = StarryNightEffect::new(config);
        assert_eq!(stars.config().max_speed, 1000.0);

        let mut leds = [BLACK; 16];
        run(&mut stars, &mut leds, 25, 20);
    }

    #[test_log::test]
    fn test_extreme_probability_survives_idle_frame() {
        for probability in [1e38, f32::INFINITY, f32::NAN] {
            let mut config = quiet_stars();
            config.probability = probability;
            let mut stars = StarryNightEffect::new(config);
            assert!(stars.config().probability.is_finite());

            let mut leds = [BLACK; 10];
            let mut clock = FrameClock::new(Instant::from_millis(0));
            let mut rng = SmallRng::seed_from_u64(9);
            stars.init(&mut leds, &mut RenderContext::new(&clock, &mut rng));
            // Same instant twice gives a zero delta
            clock.advance(Instant::from_millis(0));
            stars.draw(&mut leds, &mut RenderContext::new(&clock, &mut rng));
            for frame in 1..=5 {
                clock.advance(Instant::from_millis(frame * 20));
                stars.draw(&mut leds, &mut RenderContext::new(&clock, &mut rng));
            }

            if probability.is_nan() {
                assert_eq!(stars.star_count(), 0);
            } else {
                assert!(stars.star_count() > 0, "no stars at {probability}");
                assert!(stars.star_count() <= leds.len());
            }
        }
    }

    #[test]
    fn test_star_config_is_sanitized() {
        let mut config = quiet_stars();
        config.probability = -3.0;
        config.star_size = f32::NAN;
        config.max_speed = f32::NEG_INFINITY;
        config.blur_factor = 7.0;
        let sane = config.sanitized();
        assert_eq!(sane.probability, 0.0);
        assert_eq!(sane.star_size, 1.0);
        assert_eq!(sane.max_speed, 0.0);
        assert_eq!(sane.blur_factor, 1.0);
    }

    #[test]
    fn test_status_overlay_colors() {
        let mut overlay = StatusEffect::new();
        let mut leds = [WHITE; 7];
        run(&mut overlay, &mut leds, 1, 20);
        assert_eq!(leds[0], rgb_from_u32(0x00_8000));
        assert_eq!(leds[1], BLACK);
        assert_eq!(leds[3], rgb_from_u32(0x00_8000));

        overlay.set_error(StatusError::Messaging);
        run(&mut overlay, &mut leds, 1, 20);
        assert_eq!(leds[6], rgb_from_u32(0x80_0080));

        assert!(StatusError::Wifi > StatusError::Messaging);
        assert!(StatusError::Messaging > StatusError::General);
        assert!(StatusError::Wifi.is_link());
        assert!(!StatusError::General.is_link());
    }
}
