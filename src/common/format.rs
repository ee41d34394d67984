use colored::*;

/// Format bytes into human-readable size string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format size with color based on magnitude
pub fn format_size_colored(bytes: u64) -> ColoredString {
    let s = format_size(bytes);
    const MB100: u64 = 100 * 1024 * 1024;

    if bytes >= MB100 {
        s.yellow()
    } else {
        s.normal()
    }
}

/// Format a count with a noun, pluralised
pub fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else if noun.ends_with('s') {
        format!("{} {}es", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Format a path for display, replacing `home` with ~
pub fn format_path(path: &std::path::Path, home: &std::path::Path) -> String {
    if let Ok(stripped) = path.strip_prefix(home) {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, "process"), "0 processes");
        assert_eq!(format_count(1, "path"), "1 path");
        assert_eq!(format_count(3, "path"), "3 paths");
    }

    #[test]
    fn test_format_path_under_home() {
        let home = Path::new("/home/tester");
        assert_eq!(format_path(&home.join(".config/zoom"), home), "~/.config/zoom");
        assert_eq!(format_path(Path::new("/tmp/roam/Zoom"), home), "/tmp/roam/Zoom");
    }
}
