use fraction::Fraction;
use pantryplan_shared::unit::{CountUnit, MassUnit, VolumeUnit};
use pantryplan_shared::Unit;

/// Round to two decimals and drop trailing zeros: 2.50 -> "2.5", 3.0 -> "3".
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }

    let formatted = format!("{:.2}", (value * 100.0).round() / 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "" | "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// Round a kitchen measure to a practical cooking value.
///
/// - below 1: nearest 1/4, 1/3 or 1/2
/// - 1 to 10: nearest 1/2
/// - above 10: nearest whole number
///
/// Degenerate values read as 0. A positive amount never rounds away to 0.
pub fn round_to_practical_value(value: f64) -> Fraction {
    if !value.is_finite() || value <= 0.0 {
        return Fraction::new(0u64, 1u64);
    }

    if value < 1.0 {
        let quarters = (value * 4.0).round().max(1.0);
        let thirds = (value * 3.0).round().max(1.0);
        let halves = (value * 2.0).round().max(1.0);

        let diff_quarters = (value - quarters / 4.0).abs();
        let diff_thirds = (value - thirds / 3.0).abs();
        let diff_halves = (value - halves / 2.0).abs();

        if diff_quarters <= diff_thirds && diff_quarters <= diff_halves {
            Fraction::new(quarters as u64, 4u64)
        } else if diff_thirds <= diff_halves {
            Fraction::new(thirds as u64, 3u64)
        } else {
            Fraction::new(halves as u64, 2u64)
        }
    } else if value < 10.0 {
        Fraction::new((value * 2.0).round() as u64, 2u64)
    } else {
        Fraction::new(value.round() as u64, 1u64)
    }
}

/// Whole, mixed or pure fraction: "2", "1 1/2", "1/3".
fn format_fraction(fraction: Fraction) -> String {
    let (Some(&numer), Some(&denom)) = (fraction.numer(), fraction.denom()) else {
        return "0".to_owned();
    };

    let whole = numer / denom;
    let remainder = numer % denom;

    match (whole, remainder) {
        (whole, 0) => whole.to_string(),
        (0, remainder) => format!("{remainder}/{denom}"),
        (whole, remainder) => format!("{whole} {remainder}/{denom}"),
    }
}

/// Quantity with its unit as printed on a shopping list.
///
/// Grams and millilitres from 1000 up are shown as kg and l. Plain counts
/// print the number alone.
pub fn format_quantity(quantity: f64, unit: &Unit) -> String {
    match unit {
        Unit::Mass(MassUnit::Gram) if quantity >= 1000.0 => {
            format!("{} {}", format_number(quantity / 1000.0), MassUnit::Kilogram)
        }
        Unit::Volume(VolumeUnit::Milliliter) if quantity >= 1000.0 => {
            format!("{} {}", format_number(quantity / 1000.0), VolumeUnit::Liter)
        }
        Unit::Volume(VolumeUnit::Cup | VolumeUnit::Tablespoon | VolumeUnit::Teaspoon) => {
            format!("{} {unit}", format_fraction(round_to_practical_value(quantity)))
        }
        Unit::Count(CountUnit::Piece) => format_number(quantity),
        _ => format!("{} {unit}", format_number(quantity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.333333), "0.33");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_large_metric_quantities_scaled() {
        assert_eq!(format_quantity(400.0, &Unit::parse("g")), "400 g");
        assert_eq!(format_quantity(1000.0, &Unit::parse("g")), "1 kg");
        assert_eq!(format_quantity(1500.0, &Unit::parse("gramos")), "1.5 kg");
        assert_eq!(format_quantity(2250.0, &Unit::parse("ml")), "2.25 l");
        assert_eq!(format_quantity(2.0, &Unit::parse("kg")), "2 kg");
    }

    #[test]
    fn test_spoons_and_cups_as_fractions() {
        assert_eq!(format_quantity(1.5, &Unit::parse("cup")), "1 1/2 cup");
        assert_eq!(format_quantity(0.75, &Unit::parse("tsp")), "3/4 tsp");
        assert_eq!(format_quantity(2.0, &Unit::parse("cucharadas")), "2 tbsp");
        assert_eq!(format_quantity(0.3, &Unit::parse("taza")), "1/3 cup");
        assert_eq!(format_quantity(1.0 / 3.0, &Unit::parse("cup")), "1/3 cup");
        assert_eq!(format_quantity(2.0 / 3.0, &Unit::parse("tbsp")), "2/3 tbsp");
        assert_eq!(format_quantity(12.4, &Unit::parse("tazas")), "12 cup");
    }

    #[test]
    fn test_round_to_practical_value() {
        assert_eq!(round_to_practical_value(0.5), Fraction::new(1u64, 2u64));
        assert_eq!(round_to_practical_value(0.3), Fraction::new(1u64, 3u64));
        assert_eq!(round_to_practical_value(0.26), Fraction::new(1u64, 4u64));
        assert_eq!(round_to_practical_value(0.05), Fraction::new(1u64, 4u64));
        assert_eq!(round_to_practical_value(3.3), Fraction::new(7u64, 2u64));
        assert_eq!(round_to_practical_value(10.6), Fraction::new(11u64, 1u64));
        assert_eq!(round_to_practical_value(0.0), Fraction::new(0u64, 1u64));
        assert_eq!(round_to_practical_value(f64::NAN), Fraction::new(0u64, 1u64));
        assert_eq!(round_to_practical_value(-1.0), Fraction::new(0u64, 1u64));
    }

    #[test]
    fn test_counts_and_other_units() {
        assert_eq!(format_quantity(3.0, &Unit::parse("")), "3");
        assert_eq!(format_quantity(2.0, &Unit::parse("dientes")), "2 clove");
        assert_eq!(format_quantity(1.0, &Unit::parse("pizca")), "1 pizca");
    }
}
