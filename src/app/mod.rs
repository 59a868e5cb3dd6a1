pub mod dispatch;
mod render;
