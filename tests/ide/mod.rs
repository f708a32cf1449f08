mod tests_extract;
mod tests_goto;
