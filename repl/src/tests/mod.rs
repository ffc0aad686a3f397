#[cfg(test)]
mod dsl;
#[cfg(test)]
mod test_argspec;
