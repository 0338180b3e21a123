mod http_reporter;

pub use http_reporter::HttpReporter;
