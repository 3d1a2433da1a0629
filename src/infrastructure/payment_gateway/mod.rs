pub mod khalti_client;
