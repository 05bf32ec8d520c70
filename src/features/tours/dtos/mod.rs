mod tour_dto;

pub use tour_dto::{CreateTourDto, TourResponseDto, TourStatsDto, UpdateTourDto};
