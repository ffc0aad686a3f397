#[cfg(test)]
mod test_call;
#[cfg(test)]
mod test_subscript;
