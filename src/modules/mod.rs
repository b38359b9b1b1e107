pub mod rekognition_client;
pub mod replay_client;
pub mod response;
pub mod vision_client;
