mod invest_tests;
mod pages_tests;
mod predict_tests;
