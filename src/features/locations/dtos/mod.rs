mod location_dto;

pub use location_dto::{
    CoordinatesDto, CreateLocationDto, KindCountDto, LocationResponseDto, LocationStatsDto,
    UpdateLocationDto,
};
