pub(super) fn default_alarm_hour() -> u32 {
    9
}

pub(super) fn default_poll_interval_secs() -> u64 {
    60
}

pub(super) fn default_web_check_interval_secs() -> u64 {
    6 * 60 * 60
}

pub(super) fn default_web_selector() -> String {
    "body > main > section.event-hero.bg-mono-darkest.color-brand-primary > div.event-hero__content > div > div > div:nth-child(1) > div > div.event-hero__buttons.mt-5 > p".to_string()
}

pub(super) fn default_web_placeholder() -> String {
    "Check back soon for entry details on this race".to_string()
}
