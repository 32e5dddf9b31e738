mod landing;
pub use landing::Landing;

mod community;
pub use community::Community;
