pub mod meal_plans;
pub mod ratings;
pub mod recipes;
pub mod recommendations;
