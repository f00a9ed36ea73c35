/// Human-readable calorie total: one fraction digit, switching to kcal at 1000.
pub fn format_calories(calories: f64) -> String {
    if calories >= 1000.0 {
        format!("{:.1} kcal", calories / 1000.0)
    } else {
        format!("{:.1} cal", calories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_unit_at_one_thousand() {
        assert_eq!(format_calories(1500.0), "1.5 kcal");
        assert_eq!(format_calories(1000.0), "1.0 kcal");
        assert_eq!(format_calories(999.9), "999.9 cal");
    }

    #[test]
    fn keeps_one_fraction_digit() {
        assert_eq!(format_calories(250.4), "250.4 cal");
        assert_eq!(format_calories(0.0), "0.0 cal");
        assert_eq!(format_calories(4.912), "4.9 cal");
    }
}
