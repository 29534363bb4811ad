pub mod matches;
pub mod words;
pub mod disjunction;
pub mod conjunction;
pub mod mild_not;
pub mod not;
pub mod order;
pub mod scope;
pub mod content;
pub mod distance;
pub mod window;
pub mod executor;
pub mod evaluator;
