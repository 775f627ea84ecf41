//! GPIO / peripheral pin assignments for the SmartLamp board (ESP32 DevKit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// LDR voltage divider, analog input.  Higher voltage = darker room.
/// ADC1 channel 6 on the classic ESP32.
pub const LDR_ADC_GPIO: i32 = 34;
/// ADC1 channel backing [`LDR_ADC_GPIO`].
pub const LDR_ADC_CHANNEL: u32 = 6;

/// PIR motion sensor, digital input, HIGH = motion.
/// Internal pull-down keeps the line low while the module is absent or warming up.
pub const PIR_GPIO: i32 = 23;

/// Momentary push-button that silences the wake buzzer.
/// Active-low with internal pull-up.
pub const BUTTON_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Red night lamp, digital output, HIGH = on.
pub const RED_LAMP_GPIO: i32 = 2;
/// Yellow presence lamp, digital output, HIGH = on.
pub const YELLOW_LAMP_GPIO: i32 = 4;
/// Active buzzer, digital output, HIGH = sounding.
pub const BUZZER_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// I²C bus (128x64 OLED status panel)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// ADC configuration
// ---------------------------------------------------------------------------

/// ADC sample width (bits).  12-bit gives 0..=4095.
pub const ADC_RESOLUTION_BITS: u32 = 12;
/// Full-scale raw value for [`ADC_RESOLUTION_BITS`].
pub const ADC_FULL_SCALE: u16 = (1 << ADC_RESOLUTION_BITS) - 1;
