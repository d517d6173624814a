pub mod api_app;
pub mod backend_mock;
