mod html;

pub use html::HtmlReceiptRenderer;
