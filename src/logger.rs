use log::{Level, LevelFilter};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        // This method wont be called.
        unreachable!()
    }

    fn log(&self, record: &log::Record) {
        match record.level() {
            Level::Debug | Level::Trace => println!("[Debug] {}", record.args()),
            _ => println!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn init(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Result is ignored since we guarantee that init is called only one time.
    let _ = log::set_logger(&LOGGER).map(|_| log::set_max_level(level));
}
