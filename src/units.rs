//! Unit conversion engine
//!
//! Every category converts in two hops through a pivot unit: scale the
//! input into the pivot, then scale the pivot into the target. Temperature
//! uses affine formulas instead of plain factors. Speed also carries two
//! pace units (time per distance) that invert rather than scale; pace
//! results are rounded to 2 decimals.

use crate::error::CalcError;
use crate::number::round_half_up;
use log::debug;
use serde::Serialize;
use std::fmt;
use wasm_bindgen::prelude::*;

/// Decimals kept on pace results
const PACE_DECIMALS: i32 = 2;

/// Meters in a kilometer and in a mile, as used by the pace units
const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.34;

/// A closed set of units belonging to one category
pub trait UnitKind: Copy + PartialEq + fmt::Debug + 'static {
    /// Units in display order
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.name() == name)
    }

    fn convert(value: f64, from: Self, to: Self) -> f64;
}

/// Two-hop conversion through a pivot: `value * from / to`
fn via_pivot(value: f64, from_factor: f64, to_factor: f64) -> f64 {
    let pivot = value * from_factor;
    pivot / to_factor
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
    Inches,
    Centimeters,
}

impl LengthUnit {
    /// Meters per unit (pivot: meters)
    fn factor(self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Miles => 1609.34,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Centimeters => 0.01,
        }
    }
}

impl UnitKind for LengthUnit {
    const ALL: &'static [Self] = &[
        LengthUnit::Meters,
        LengthUnit::Kilometers,
        LengthUnit::Miles,
        LengthUnit::Feet,
        LengthUnit::Inches,
        LengthUnit::Centimeters,
    ];

    fn name(self) -> &'static str {
        match self {
            LengthUnit::Meters => "Meters",
            LengthUnit::Kilometers => "Kilometers",
            LengthUnit::Miles => "Miles",
            LengthUnit::Feet => "Feet",
            LengthUnit::Inches => "Inches",
            LengthUnit::Centimeters => "Centimeters",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        via_pivot(value, from.factor(), to.factor())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    Kilograms,
    Grams,
    Pounds,
    Ounces,
}

impl WeightUnit {
    /// Grams per unit (pivot: grams)
    fn factor(self) -> f64 {
        match self {
            WeightUnit::Kilograms => 1000.0,
            WeightUnit::Grams => 1.0,
            WeightUnit::Pounds => 453.592,
            WeightUnit::Ounces => 28.3495,
        }
    }
}

impl UnitKind for WeightUnit {
    const ALL: &'static [Self] = &[
        WeightUnit::Kilograms,
        WeightUnit::Grams,
        WeightUnit::Pounds,
        WeightUnit::Ounces,
    ];

    fn name(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "Kilograms",
            WeightUnit::Grams => "Grams",
            WeightUnit::Pounds => "Pounds",
            WeightUnit::Ounces => "Ounces",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        via_pivot(value, from.factor(), to.factor())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    }
}

impl UnitKind for TemperatureUnit {
    const ALL: &'static [Self] = &[
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    fn name(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        to.from_celsius(from.to_celsius(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    Liters,
    Milliliters,
    Gallons,
    FluidOunces,
    Cups,
}

impl VolumeUnit {
    /// Milliliters per unit (pivot: milliliters)
    fn factor(self) -> f64 {
        match self {
            VolumeUnit::Liters => 1000.0,
            VolumeUnit::Milliliters => 1.0,
            VolumeUnit::Gallons => 3785.41,
            VolumeUnit::FluidOunces => 29.5735,
            VolumeUnit::Cups => 236.588,
        }
    }
}

impl UnitKind for VolumeUnit {
    const ALL: &'static [Self] = &[
        VolumeUnit::Liters,
        VolumeUnit::Milliliters,
        VolumeUnit::Gallons,
        VolumeUnit::FluidOunces,
        VolumeUnit::Cups,
    ];

    fn name(self) -> &'static str {
        match self {
            VolumeUnit::Liters => "Liters",
            VolumeUnit::Milliliters => "Milliliters",
            VolumeUnit::Gallons => "Gallons",
            VolumeUnit::FluidOunces => "Fluid Ounces",
            VolumeUnit::Cups => "Cups",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        via_pivot(value, from.factor(), to.factor())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaUnit {
    SquareMeters,
    SquareFeet,
    SquareInches,
    Acres,
    Hectares,
}

impl AreaUnit {
    /// Square meters per unit (pivot: square meters)
    fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::SquareFeet => 0.092903,
            AreaUnit::SquareInches => 0.00064516,
            AreaUnit::Acres => 4046.86,
            AreaUnit::Hectares => 10000.0,
        }
    }
}

impl UnitKind for AreaUnit {
    const ALL: &'static [Self] = &[
        AreaUnit::SquareMeters,
        AreaUnit::SquareFeet,
        AreaUnit::SquareInches,
        AreaUnit::Acres,
        AreaUnit::Hectares,
    ];

    fn name(self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "Square Meters",
            AreaUnit::SquareFeet => "Square Feet",
            AreaUnit::SquareInches => "Square Inches",
            AreaUnit::Acres => "Acres",
            AreaUnit::Hectares => "Hectares",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        via_pivot(value, from.factor(), to.factor())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    MilesPerHour,
    KilometersPerHour,
    MetersPerSecond,
    Knots,
    FeetPerSecond,
    MinutesPerKilometer,
    MinutesPerMile,
}

impl SpeedUnit {
    /// Meters per second per unit for distance-per-time units
    /// (pivot: meters per second). `None` for pace units.
    fn factor(self) -> Option<f64> {
        match self {
            SpeedUnit::MilesPerHour => Some(0.44704),
            SpeedUnit::KilometersPerHour => Some(0.277778),
            SpeedUnit::MetersPerSecond => Some(1.0),
            SpeedUnit::Knots => Some(0.514444),
            SpeedUnit::FeetPerSecond => Some(0.3048),
            SpeedUnit::MinutesPerKilometer | SpeedUnit::MinutesPerMile => None,
        }
    }

    /// Distance in meters that a pace unit is measured over
    fn pace_distance(self) -> Option<f64> {
        match self {
            SpeedUnit::MinutesPerKilometer => Some(METERS_PER_KILOMETER),
            SpeedUnit::MinutesPerMile => Some(METERS_PER_MILE),
            _ => None,
        }
    }

    pub fn is_pace(self) -> bool {
        self.pace_distance().is_some()
    }

    fn to_meters_per_second(self, value: f64) -> f64 {
        match (self.pace_distance(), self.factor()) {
            (Some(distance), _) => distance / (value * 60.0),
            (None, Some(factor)) => value * factor,
            (None, None) => f64::NAN,
        }
    }

    fn from_meters_per_second(self, mps: f64) -> f64 {
        match (self.pace_distance(), self.factor()) {
            (Some(distance), _) => round_half_up(distance / (mps * 60.0), PACE_DECIMALS),
            (None, Some(factor)) => mps / factor,
            (None, None) => f64::NAN,
        }
    }
}

impl UnitKind for SpeedUnit {
    const ALL: &'static [Self] = &[
        SpeedUnit::MilesPerHour,
        SpeedUnit::KilometersPerHour,
        SpeedUnit::MetersPerSecond,
        SpeedUnit::Knots,
        SpeedUnit::FeetPerSecond,
        SpeedUnit::MinutesPerKilometer,
        SpeedUnit::MinutesPerMile,
    ];

    fn name(self) -> &'static str {
        match self {
            SpeedUnit::MilesPerHour => "Miles per Hour",
            SpeedUnit::KilometersPerHour => "Kilometers per Hour",
            SpeedUnit::MetersPerSecond => "Meters per Second",
            SpeedUnit::Knots => "Knots",
            SpeedUnit::FeetPerSecond => "Feet per Second",
            SpeedUnit::MinutesPerKilometer => "Minutes per Kilometer",
            SpeedUnit::MinutesPerMile => "Minutes per Mile",
        }
    }

    fn convert(value: f64, from: Self, to: Self) -> f64 {
        to.from_meters_per_second(from.to_meters_per_second(value))
    }
}

/// Conversion categories in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Volume,
    Area,
    Speed,
}

/// Any unit, tagged with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Length(LengthUnit),
    Weight(WeightUnit),
    Temperature(TemperatureUnit),
    Volume(VolumeUnit),
    Area(AreaUnit),
    Speed(SpeedUnit),
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Volume,
        Category::Area,
        Category::Speed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
            Category::Volume => "Volume",
            Category::Area => "Area",
            Category::Speed => "Speed",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Units in display order
    pub fn units(&self) -> Vec<Unit> {
        match self {
            Category::Length => LengthUnit::ALL.iter().map(|&u| Unit::Length(u)).collect(),
            Category::Weight => WeightUnit::ALL.iter().map(|&u| Unit::Weight(u)).collect(),
            Category::Temperature => TemperatureUnit::ALL
                .iter()
                .map(|&u| Unit::Temperature(u))
                .collect(),
            Category::Volume => VolumeUnit::ALL.iter().map(|&u| Unit::Volume(u)).collect(),
            Category::Area => AreaUnit::ALL.iter().map(|&u| Unit::Area(u)).collect(),
            Category::Speed => SpeedUnit::ALL.iter().map(|&u| Unit::Speed(u)).collect(),
        }
    }

    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units().iter().map(|u| u.name()).collect()
    }

    /// First and second unit, the initial from/to pair
    pub fn default_pair(&self) -> (Unit, Unit) {
        let units = self.units();
        (units[0], units[1])
    }

    /// Resolve a unit name within this category
    pub fn unit(&self, name: &str) -> Result<Unit, CalcError> {
        let unit = match self {
            Category::Length => LengthUnit::from_name(name).map(Unit::Length),
            Category::Weight => WeightUnit::from_name(name).map(Unit::Weight),
            Category::Temperature => TemperatureUnit::from_name(name).map(Unit::Temperature),
            Category::Volume => VolumeUnit::from_name(name).map(Unit::Volume),
            Category::Area => AreaUnit::from_name(name).map(Unit::Area),
            Category::Speed => SpeedUnit::from_name(name).map(Unit::Speed),
        };
        unit.ok_or_else(|| CalcError::UnknownUnit {
            category: self.name().to_string(),
            unit: name.to_string(),
        })
    }

    /// Convert between two units of this category given by name
    pub fn convert_named(&self, value: f64, from: &str, to: &str) -> Result<f64, CalcError> {
        convert(value, self.unit(from)?, self.unit(to)?)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Unit {
    pub fn category(&self) -> Category {
        match self {
            Unit::Length(_) => Category::Length,
            Unit::Weight(_) => Category::Weight,
            Unit::Temperature(_) => Category::Temperature,
            Unit::Volume(_) => Category::Volume,
            Unit::Area(_) => Category::Area,
            Unit::Speed(_) => Category::Speed,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Unit::Length(u) => u.name(),
            Unit::Weight(u) => u.name(),
            Unit::Temperature(u) => u.name(),
            Unit::Volume(u) => u.name(),
            Unit::Area(u) => u.name(),
            Unit::Speed(u) => u.name(),
        }
    }

    /// Time-per-distance unit, whose results carry 2 decimals
    pub fn is_pace(&self) -> bool {
        matches!(self, Unit::Speed(u) if u.is_pace())
    }
}

/// Convert `value` between two units of the same category.
///
/// Units from different categories are rejected; numeric edge cases
/// (zero pace, division overflow) come back as infinities or NaN.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, CalcError> {
    let result = match (from, to) {
        (Unit::Length(a), Unit::Length(b)) => LengthUnit::convert(value, a, b),
        (Unit::Weight(a), Unit::Weight(b)) => WeightUnit::convert(value, a, b),
        (Unit::Temperature(a), Unit::Temperature(b)) => TemperatureUnit::convert(value, a, b),
        (Unit::Volume(a), Unit::Volume(b)) => VolumeUnit::convert(value, a, b),
        (Unit::Area(a), Unit::Area(b)) => AreaUnit::convert(value, a, b),
        (Unit::Speed(a), Unit::Speed(b)) => SpeedUnit::convert(value, a, b),
        _ => {
            return Err(CalcError::UnknownUnit {
                category: from.category().name().to_string(),
                unit: to.name().to_string(),
            })
        }
    };
    debug!("convert {} {} -> {} {}", value, from.name(), result, to.name());
    Ok(result)
}

/// Category listing sent to the front end
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub units: Vec<&'static str>,
}

pub fn category_infos() -> Vec<CategoryInfo> {
    Category::ALL
        .iter()
        .map(|c| CategoryInfo {
            name: c.name(),
            units: c.unit_names(),
        })
        .collect()
}

/// All categories with their units, in display order
#[wasm_bindgen(js_name = unitCategories)]
pub fn unit_categories_js() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&category_infos()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert between two named units of a named category
#[wasm_bindgen(js_name = convertUnits)]
pub fn convert_units_js(category: &str, value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    let category =
        Category::from_name(category).ok_or_else(|| CalcError::UnknownCategory(category.to_string()))?;
    Ok(category.convert_named(value, from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_length() {
        assert_eq!(
            LengthUnit::convert(1.0, LengthUnit::Kilometers, LengthUnit::Meters),
            1000.0
        );
        assert_close(
            LengthUnit::convert(1.0, LengthUnit::Miles, LengthUnit::Kilometers),
            1.60934,
        );
        assert_close(
            LengthUnit::convert(12.0, LengthUnit::Inches, LengthUnit::Feet),
            1.0,
        );
    }

    #[test]
    fn test_temperature() {
        use TemperatureUnit::*;
        assert_eq!(TemperatureUnit::convert(0.0, Celsius, Fahrenheit), 32.0);
        assert_eq!(TemperatureUnit::convert(100.0, Celsius, Kelvin), 373.15);
        assert_eq!(TemperatureUnit::convert(212.0, Fahrenheit, Celsius), 100.0);
        assert_close(TemperatureUnit::convert(-40.0, Fahrenheit, Celsius), -40.0);
        assert_close(TemperatureUnit::convert(273.15, Kelvin, Fahrenheit), 32.0);
    }

    #[test]
    fn test_weight_volume_area() {
        assert_eq!(
            WeightUnit::convert(2.5, WeightUnit::Kilograms, WeightUnit::Grams),
            2500.0
        );
        assert_close(
            VolumeUnit::convert(1.0, VolumeUnit::Gallons, VolumeUnit::Liters),
            3.78541,
        );
        assert_close(
            AreaUnit::convert(1.0, AreaUnit::Hectares, AreaUnit::SquareMeters),
            10000.0,
        );
    }

    #[test]
    fn test_linear_round_trip() {
        for category in [Category::Length, Category::Weight, Category::Volume, Category::Area] {
            for &a in &category.units() {
                for &b in &category.units() {
                    let there = convert(7.25, a, b).unwrap();
                    let back = convert(there, b, a).unwrap();
                    assert_close(back, 7.25);
                }
            }
        }
    }

    #[test]
    fn test_speed_standard_units() {
        use SpeedUnit::*;
        assert_close(SpeedUnit::convert(10.0, MetersPerSecond, KilometersPerHour), 10.0 / 0.277778);
        assert_close(SpeedUnit::convert(1.0, MilesPerHour, MetersPerSecond), 0.44704);
    }

    #[test]
    fn test_pace_from_speed() {
        use SpeedUnit::*;
        assert_eq!(SpeedUnit::convert(12.0, KilometersPerHour, MinutesPerKilometer), 5.0);
        assert_eq!(SpeedUnit::convert(1.0, MetersPerSecond, MinutesPerKilometer), 16.67);
        assert_eq!(SpeedUnit::convert(10.0, MilesPerHour, MinutesPerMile), 6.0);
    }

    #[test]
    fn test_pace_to_speed() {
        use SpeedUnit::*;
        assert_close(SpeedUnit::convert(5.0, MinutesPerKilometer, MetersPerSecond), 1000.0 / 300.0);
        assert_eq!(SpeedUnit::convert(5.0, MinutesPerKilometer, MinutesPerMile), 8.05);
    }

    #[test]
    fn test_pace_round_trip_bounded() {
        use SpeedUnit::*;
        let speed = SpeedUnit::convert(5.0, MinutesPerKilometer, KilometersPerHour);
        let pace = SpeedUnit::convert(speed, KilometersPerHour, MinutesPerKilometer);
        assert!((pace - 5.0).abs() <= 0.01);

        let speed = SpeedUnit::convert(7.3, MinutesPerMile, Knots);
        let pace = SpeedUnit::convert(speed, Knots, MinutesPerMile);
        assert!((pace - 7.3).abs() <= 0.01);
    }

    #[test]
    fn test_zero_speed_pace() {
        use SpeedUnit::*;
        assert_eq!(
            SpeedUnit::convert(0.0, KilometersPerHour, MinutesPerKilometer),
            f64::INFINITY
        );
        assert_eq!(
            SpeedUnit::convert(0.0, MinutesPerKilometer, KilometersPerHour),
            f64::INFINITY
        );
    }

    #[test]
    fn test_named_conversion() {
        assert_eq!(
            Category::Length.convert_named(1.0, "Kilometers", "Meters").unwrap(),
            1000.0
        );
        assert_eq!(
            Category::Temperature
                .convert_named(0.0, "Celsius", "Fahrenheit")
                .unwrap(),
            32.0
        );
        assert_eq!(
            Category::Temperature
                .convert_named(100.0, "Celsius", "Kelvin")
                .unwrap(),
            373.15
        );
        assert!(matches!(
            Category::Length.convert_named(1.0, "Kilometers", "Celsius"),
            Err(CalcError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_cross_category_rejected() {
        let result = convert(
            1.0,
            Unit::Length(LengthUnit::Meters),
            Unit::Weight(WeightUnit::Grams),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_registry() {
        assert_eq!(Category::ALL.len(), 6);
        assert_eq!(Category::from_name("Speed"), Some(Category::Speed));
        assert_eq!(Category::from_name("Time"), None);
        for category in Category::ALL {
            let units = category.units();
            assert!(units.len() >= 2);
            for unit in &units {
                assert_eq!(unit.category(), category);
                assert_eq!(category.unit(unit.name()).unwrap(), *unit);
            }
        }
        assert_eq!(Category::Speed.units().len(), 7);
        assert_eq!(
            Category::Volume.default_pair(),
            (Unit::Volume(VolumeUnit::Liters), Unit::Volume(VolumeUnit::Milliliters))
        );
    }

    #[test]
    fn test_is_pace() {
        assert!(Unit::Speed(SpeedUnit::MinutesPerMile).is_pace());
        assert!(!Unit::Speed(SpeedUnit::Knots).is_pace());
        assert!(!Unit::Length(LengthUnit::Miles).is_pace());
    }

    #[test]
    fn test_category_infos() {
        let infos = category_infos();
        assert_eq!(infos[0].name, "Length");
        assert_eq!(infos[3].units[3], "Fluid Ounces");
    }
}
