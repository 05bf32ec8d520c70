mod map_dto;

pub use map_dto::{
    CredentialDto, EngineEventDto, EngineEventKind, FlyToDto, GalleryIndexDto, MapPhaseDto,
    MapStateDto, SearchDto, SetFiltersDto,
};
