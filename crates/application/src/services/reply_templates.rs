//! Fixed replies the relay sends without asking the backend
//!
//! Users and existing integrations match on these texts, so they are kept
//! byte for byte, trailing whitespace included.

/// Sent when a message has no text and no attachment
pub const WELCOME_MESSAGE: &str = concat!(
    "🤖 *Welcome to WhatsApp Glass Bot!*\n",
    "\n",
    "I can help you manage your glass orders. Here are the available commands:\n",
    "\n",
    "📋 *View Orders:*\n",
    "• `/pending` - Show all pending orders\n",
    "• `/ready` - Show all ready orders  \n",
    "• `/delivered` - Show all delivered orders\n",
    "• `/completed` - Show all completed orders\n",
    "• `/all` - Show summary of all tabs\n",
    "\n",
    "🔍 *Search & Status:*\n",
    "• `/search [term]` - Search orders by ID, client name, or specs\n",
    "• `/status [client/ID]` - Find specific order status\n",
    "\n",
    "🔄 *Update Orders:*\n",
    "• `/update [order_id] [status]` - Update order status\n",
    "\n",
    "📝 *Add New Order:*\n",
    "Just send your order details as text!\n",
    "\n",
    "Type `/help` for detailed help anytime.",
);

/// Sent instead of forwarding a message that carries an attachment
pub const ATTACHMENT_REDIRECT_MESSAGE: &str = concat!(
    "📝 Please send your order details as text instead of an image.\n",
    "\n",
    "For example:\n",
    "Client Name: John Doe\n",
    "Glass Specifications: 10mm Clear Glass\n",
    "Sizes: 2000x1000\n",
    "Quantity: 2\n",
    "Notes: Tempered glass",
);

/// Sent when the backend call fails for any reason
pub const ERROR_MESSAGE: &str =
    "❌ Error processing your request. Please try again or contact support.";
