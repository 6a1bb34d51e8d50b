use chrono::Duration;

/// `H:MM:SS`, with a leading `-` for negative durations.
pub fn format_hms(d: &Duration) -> String {
    let sign = if *d < Duration::zero() { "-" } else { "" };
    let mut tmp = if sign.is_empty() { *d } else { -*d };

    let h = tmp.num_hours();
    tmp = tmp - Duration::hours(h);
    let m = tmp.num_minutes();
    tmp = tmp - Duration::minutes(m);
    let s = tmp.num_seconds();
    format!("{}{}:{:02}:{:02}", sign, h, m, s)
}
