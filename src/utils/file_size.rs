pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human readable size with at most one decimal, e.g. `1.5 KB` or `2 MB`.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        if size == 0 {
            return "0 B".to_string();
        }

        let mut value = size as f64;
        let mut unit_index = 0;
        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        let rounded = (value * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{} {}", rounded as u64, UNITS[unit_index])
        } else {
            format!("{:.1} {}", rounded, UNITS[unit_index])
        }
    }

    pub fn extension(name: &str) -> String {
        match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_uppercase(),
            None => String::new(),
        }
    }
}
