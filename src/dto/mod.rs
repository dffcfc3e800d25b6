pub mod gpt_dto;
