//! Board definition as handed over by the document loader, before any
//! validation.

/// The full board definition
#[derive(Debug, Clone)]
pub struct BoardDefinition<'a> {
    /// Free-form mcu part number, e.g. `STM32F401CCU6`
    pub mcu_type: &'a str,
    /// Supply voltage in volts, e.g. `3.3`
    pub voltage: f64,
    /// Specifier every pin starts from
    pub default: &'a str,
    /// Named pins, in document order
    pub pins: Vec<PinEntry<'a>>,
}

/// A named pin
#[derive(Debug, Clone)]
pub struct PinEntry<'a> {
    pub name: &'a str,
    pub specifier: &'a str,
    /// Source line in the board file, for diagnostics
    pub line: Option<usize>,
}
