pub mod r#assert;
pub mod locate;
