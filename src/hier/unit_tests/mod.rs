#[cfg(test)]
mod level_tests;
