//! The `explain` command: describe a diagnostic code.

use gram_diagnostic::ErrorCode;

/// Print the description of a code such as `E1001`.
pub fn explain_error(code_str: &str) -> bool {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.");
        eprintln!("Examples: E0001, E1001, E9001, W1001");
        return false;
    };

    let kind = if code.is_warning() { "warning" } else { "error" };
    println!("{code} ({kind}): {}", code.description());
    true
}
