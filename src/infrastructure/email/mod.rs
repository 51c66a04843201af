mod http_email_dispatcher;

pub use http_email_dispatcher::HttpEmailDispatcher;
