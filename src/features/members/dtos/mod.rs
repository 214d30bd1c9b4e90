mod member_dto;

pub use member_dto::{NewMemberDto, PhotoUpload};
