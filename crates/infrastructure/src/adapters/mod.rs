//! Adapters implementing the application ports

mod backend_adapter;
mod whatsapp_adapter;

pub use backend_adapter::BackendApiAdapter;
pub use whatsapp_adapter::WhatsAppMessengerAdapter;
