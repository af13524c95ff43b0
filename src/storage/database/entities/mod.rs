/// Answer entity module
pub mod answer;
/// Category entity module
pub mod category;
/// Question entity module
pub mod question;
/// Rating entity module
pub mod rating;
/// User entity module
pub mod user;

pub use answer::Entity as Answer;
pub use category::Entity as Category;
pub use question::Entity as Question;
pub use rating::Entity as Rating;
pub use user::Entity as User;
