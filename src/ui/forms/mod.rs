//! Form rendering module
//!
//! - `field_renderer`: inputs, chip rows and their validation state
//! - `login_form`: sign-in screen
//! - `product_form`: product entry screen

mod field_renderer;
mod login_form;
mod product_form;

pub use login_form::draw_login;
pub use product_form::draw_product;
