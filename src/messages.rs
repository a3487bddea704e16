pub const THANKS_FOR_USING: &str = "Thanks for using coolknative!";

/// Framed title, followed by usage notes and the closing line.
pub fn installed(title: &str, info: &str) -> String {
    let rule = "=".repeat(71);
    let info = info.trim_matches('\n');
    format!("\n{rule}\n= {title:<67} =\n{rule}\n\n{info}\n\n{THANKS_FOR_USING}")
}
