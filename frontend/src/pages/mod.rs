pub mod cart;
pub mod contact;
pub mod home;
pub mod landing;
pub mod login;
pub mod signup;

pub use cart::CartPage;
pub use contact::ContactPage;
pub use home::Home;
pub use landing::Landing;
pub use login::Login;
pub use signup::Signup;
