mod cleaning_tests;
mod sampling_tests;
mod signature_tests;
