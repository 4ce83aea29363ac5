//! Register cell tests: truncating assignment, signal handling, display.

use aulsim_core::datapath::Register;
use pretty_assertions::assert_eq;

#[test]
fn new_register_is_zero_with_signals_closed() {
    let reg = Register::new("AC", 8);
    assert_eq!(reg.get(), 0);
    assert!(!reg.is_input_open());
    assert!(!reg.is_output_open());
}

#[test]
fn set_truncates_modulo_width() {
    let mut reg = Register::new("AC", 8);
    reg.set(300);
    assert_eq!(reg.get(), 300 % 256);
    reg.set(256);
    assert_eq!(reg.get(), 0);
    reg.set(255);
    assert_eq!(reg.get(), 255);
}

#[test]
fn set_truncates_at_other_widths() {
    let mut reg = Register::new("DP", 4);
    reg.set(0x1F);
    assert_eq!(reg.get(), 0xF);

    let mut wide = Register::new("DP", 16);
    wide.set(0x1_2345);
    assert_eq!(wide.get(), 0x2345);
}

#[test]
fn signals_open_and_close_independently() {
    let mut reg = Register::new("BR", 8);

    reg.open_in();
    assert!(reg.is_input_open());
    assert!(!reg.is_output_open());

    reg.open_out();
    assert!(reg.is_output_open());

    reg.close_in();
    assert!(!reg.is_input_open());
    assert!(reg.is_output_open());

    reg.close_out();
    assert!(!reg.is_output_open());
}

#[test]
fn display_pads_to_width_in_hex() {
    let mut reg = Register::new("AC", 8);
    reg.set(0xF);
    assert_eq!(reg.to_string(), "AC: 0F");

    reg.set(0xAB);
    assert_eq!(reg.to_string(), "AC: AB");
}
