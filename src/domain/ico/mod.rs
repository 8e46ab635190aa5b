pub mod ico_encoder;
