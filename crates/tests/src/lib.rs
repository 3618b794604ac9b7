#[cfg(test)]
mod common;

#[cfg(test)]
mod role_store_tests;

#[cfg(test)]
mod role_endpoint_tests;
