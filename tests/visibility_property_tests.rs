use bannerwatch::schedule::{ManualOverride, ScheduleConfig, VisibleDays, evaluate};
use bannerwatch::state::{BannerState, DisplayConfig, HideMode, RenderState};
use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use proptest::prelude::*;

const ZONES: &[&str] = &[
    "America/Chicago",
    "America/New_York",
    "Europe/London",
    "Asia/Tokyo",
    "Pacific/Auckland",
    "UTC",
];

/// Instants between 2000 and 2040
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_208_988_800i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn zone_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ZONES)
}

fn visible_days_strategy() -> impl Strategy<Value = VisibleDays> {
    prop_oneof![
        Just(VisibleDays::Monday),
        Just(VisibleDays::Always),
        Just(VisibleDays::Custom),
    ]
}

fn display_strategy() -> impl Strategy<Value = DisplayConfig> {
    (
        prop_oneof![Just(HideMode::Hidden), Just(HideMode::Collapsed)],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(hide_mode, allow_collapse, default_collapsed)| DisplayConfig {
            hide_mode,
            allow_collapse,
            default_collapsed,
        })
}

fn schedule(
    schedule_enabled: bool,
    timezone: &str,
    visible_days: VisibleDays,
    manual_override: ManualOverride,
) -> ScheduleConfig {
    ScheduleConfig {
        schedule_enabled,
        timezone: timezone.to_string(),
        visible_days,
        manual_override,
    }
}

/// Steps applied to a banner between observations.
#[derive(Debug, Clone)]
enum Step {
    Toggle,
    SetDisplay(DisplayConfig),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Toggle),
        1 => display_strategy().prop_map(Step::SetDisplay),
    ]
}

proptest! {
    #[test]
    fn test_force_show_always_visible(
        at in instant_strategy(),
        zone in zone_strategy(),
        enabled in any::<bool>(),
        days in visible_days_strategy(),
    ) {
        let result = evaluate(&schedule(enabled, zone, days, ManualOverride::ForceShow), at);
        prop_assert!(result.scheduled_visible);
    }

    #[test]
    fn test_force_hide_never_visible(
        at in instant_strategy(),
        zone in zone_strategy(),
        enabled in any::<bool>(),
        days in visible_days_strategy(),
    ) {
        let result = evaluate(&schedule(enabled, zone, days, ManualOverride::ForceHide), at);
        prop_assert!(!result.scheduled_visible);
    }

    #[test]
    fn test_disabled_schedule_always_visible(
        at in instant_strategy(),
        zone in zone_strategy(),
        days in visible_days_strategy(),
    ) {
        let result = evaluate(&schedule(false, zone, days, ManualOverride::Auto), at);
        prop_assert!(result.scheduled_visible);
        prop_assert!(result.checked_weekday.is_none());
    }

    #[test]
    fn test_enabled_schedule_is_monday_in_zone(
        at in instant_strategy(),
        zone in zone_strategy(),
        days in visible_days_strategy(),
    ) {
        let tz: Tz = zone.parse().unwrap();
        let expected = at.with_timezone(&tz).weekday() == Weekday::Mon;

        let result = evaluate(&schedule(true, zone, days, ManualOverride::Auto), at);
        prop_assert_eq!(result.scheduled_visible, expected);
    }

    #[test]
    fn test_evaluation_is_idempotent(
        at in instant_strategy(),
        zone in zone_strategy(),
        enabled in any::<bool>(),
        days in visible_days_strategy(),
        display in display_strategy(),
    ) {
        let config = schedule(enabled, zone, days, ManualOverride::Auto);
        prop_assert_eq!(evaluate(&config, at), evaluate(&config, at));

        let first = BannerState::new(config.clone(), display, at);
        let second = BannerState::new(config, display, at);
        prop_assert_eq!(first.render_state(), second.render_state());
    }

    #[test]
    fn test_no_collapse_without_allow_collapse(
        at in instant_strategy(),
        display in display_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..20),
    ) {
        let mut state = BannerState::new(
            schedule(true, "America/Chicago", VisibleDays::Monday, ManualOverride::ForceShow),
            display,
            at,
        );

        for step in steps {
            match step {
                Step::Toggle => {
                    state.toggle_collapse();
                }
                Step::SetDisplay(display) => state.set_display(display),
            }

            if !state.display().allow_collapse {
                prop_assert!(!state.is_collapsed());
                prop_assert_ne!(state.render_state(), RenderState::UserCollapsed);
            }
        }
    }

    #[test]
    fn test_hidden_states_ignore_toggles(
        at in instant_strategy(),
        display in display_strategy(),
        toggles in 0usize..6,
    ) {
        let mut state = BannerState::new(
            schedule(true, "America/Chicago", VisibleDays::Monday, ManualOverride::ForceHide),
            display,
            at,
        );
        let before = state.render_state();
        for _ in 0..toggles {
            state.toggle_collapse();
        }
        prop_assert_eq!(state.render_state(), before);
        prop_assert!(!state.render_state().is_visible());
    }
}
