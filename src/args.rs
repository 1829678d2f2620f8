use std::path::PathBuf;

use clap::Parser;

/// Median-smooth a 24-bit BMP and run Laplacian edge detection on the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 24-bit BMP image to process
    pub image_path: PathBuf,

    /// Median mask size (odd, at least 3)
    #[arg(value_parser = parse_mask_size)]
    pub mask_size: usize,

    /// Number of workers the rows are split across (at least 1)
    #[arg(value_parser = parse_workers)]
    pub num_workers: usize,

    /// Directory the output images are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Ignore the worker count and filter on a single thread
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_mask_size(s: &str) -> Result<usize, String> {
    let mask: usize = s.parse().map_err(|_| format!("'{s}' is not a positive integer"))?;
    if mask < 3 || mask % 2 == 0 {
        return Err(format!("mask size must be odd and at least 3, got {mask}"));
    }
    Ok(mask)
}

fn parse_workers(s: &str) -> Result<usize, String> {
    let workers: usize = s.parse().map_err(|_| format!("'{s}' is not a positive integer"))?;
    if workers < 1 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["gridstag", "in.bmp", "5", "4"]).unwrap();
        assert_eq!(args.image_path, PathBuf::from("in.bmp"));
        assert_eq!(args.mask_size, 5);
        assert_eq!(args.num_workers, 4);
        assert!(!args.sequential);
    }

    #[test]
    fn test_rejects_even_mask() {
        assert!(Args::try_parse_from(["gridstag", "in.bmp", "4", "2"]).is_err());
        assert!(Args::try_parse_from(["gridstag", "in.bmp", "1", "2"]).is_err());
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert!(Args::try_parse_from(["gridstag", "in.bmp", "3", "0"]).is_err());
        assert!(Args::try_parse_from(["gridstag", "in.bmp", "3", "-1"]).is_err());
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Args::try_parse_from(["gridstag", "in.bmp"]).is_err());
    }
}
