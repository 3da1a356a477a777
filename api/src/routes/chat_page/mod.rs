pub mod chat_form;
pub mod chat_page_route;
