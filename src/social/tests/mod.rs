mod instances_tests;
mod properties_tests;
mod suggestion_tests;
