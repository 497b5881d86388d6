mod clauses_tests;
mod select_tests;
mod values_tests;
mod where_tests;
