pub mod notification;
pub mod thirdparty;
