/// Safe numeric conversion helpers.
///
/// Provides checked conversions between the evaluator's numeric value types
/// that fail instead of silently losing data: integer-to-real promotions
/// outside the exactly representable range and signed-to-unsigned
/// promotions of negative values.
pub mod num;
