mod references;


// Evaluator tests
mod expressions;
mod scope_tests;
