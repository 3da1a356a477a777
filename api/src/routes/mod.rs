pub mod ask;
pub mod chat_page;
pub mod health_route;
pub mod image_route;
pub mod transcript_route;
