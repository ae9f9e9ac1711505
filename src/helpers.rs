use tracing::Level;

pub fn histogram(buf: &[u8]) -> Vec<u32> {
    let mut res = vec![0; 256];
    for &byte in buf {
        res[usize::from(byte)] += 1;
    }
    res
}

/// Static order-0 entropy in bits per byte, a baseline to compare the
/// adaptive estimate against.
pub fn entropy(buf: &[u8]) -> f64 {
    let total = buf.len() as f64;
    histogram(buf)
        .into_iter()
        .filter(|&count| count > 0)
        .map(|count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum()
}

/// Installs the global `tracing` subscriber for the binaries, more `-v`s
/// lower the max level.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
