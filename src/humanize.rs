// src/humanize.rs

/// (power of ten, word) pairs used by [`intword`].
const POWERS: &[(u32, &str)] = &[
    (6, "million"),
    (9, "billion"),
    (12, "trillion"),
    (15, "quadrillion"),
    (18, "quintillion"),
    (21, "sextillion"),
    (24, "septillion"),
    (27, "octillion"),
    (30, "nonillion"),
    (33, "decillion"),
];

/// Render a count as words for hover text, e.g. `12345591313` -> "12.3 billion".
///
/// Values under one million come back as the plain integer. Fractions are
/// truncated first, so a float sum like `1750.5` reads "1750".
pub fn intword(value: f64) -> String {
    let value = value.trunc();
    if !value.is_finite() || value < 1e6 {
        return format!("{}", value as i64);
    }

    for (i, &(exp, word)) in POWERS.iter().enumerate() {
        let next = POWERS.get(i + 1).map(|(e, _)| 10f64.powi(*e as i32));
        if next.map_or(true, |n| value < n) {
            let chopped = value / 10f64.powi(exp as i32);
            let rendered = format!("{:.1}", chopped);
            // 999.96 million rounds to "1000.0": carry into the next word
            if rendered == "1000.0" {
                if let Some(&(next_exp, next_word)) = POWERS.get(i + 1) {
                    return format!("{:.1} {}", value / 10f64.powi(next_exp as i32), next_word);
                }
            }
            return format!("{} {}", rendered, word);
        }
    }
    unreachable!("last power accepts every larger value")
}

/// Integer part of `value` with `,` thousands separators: `1234567.8` -> "1,234,567".
pub fn intcomma(value: f64) -> String {
    let digits = format!("{}", value.trunc().abs() as u128);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value <= -1.0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intword_small_values_stay_plain() {
        assert_eq!(intword(0.0), "0");
        assert_eq!(intword(123_455.0), "123455");
        assert_eq!(intword(1750.5), "1750");
    }

    #[test]
    fn intword_uses_power_words() {
        assert_eq!(intword(12_345_591_313.0), "12.3 billion");
        assert_eq!(intword(1_000_000.0), "1.0 million");
        assert_eq!(intword(52_573_973.0), "52.6 million");
        assert_eq!(intword(1_366_417_754.0), "1.4 billion");
        assert_eq!(intword(2.5e15), "2.5 quadrillion");
    }

    #[test]
    fn intword_carries_when_rounding_hits_a_thousand() {
        assert_eq!(intword(999_960_000.0), "1.0 billion");
    }

    #[test]
    fn intcomma_groups_thousands() {
        assert_eq!(intcomma(0.0), "0");
        assert_eq!(intcomma(999.0), "999");
        assert_eq!(intcomma(1000.0), "1,000");
        assert_eq!(intcomma(1_234_567.8), "1,234,567");
        assert_eq!(intcomma(-45_000.0), "-45,000");
    }
}
