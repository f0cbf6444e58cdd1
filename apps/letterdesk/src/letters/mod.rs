// Letter generation: form collection, the required-field gate, the shared
// block model and the HTML preview. PDF output lives in `layout`.

pub mod collector;
pub mod document;
pub mod format;
pub mod handlers;
pub mod html;
pub mod validation;
