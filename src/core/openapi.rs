use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::locations::{
    dtos as locations_dtos, handlers as locations_handlers, models as locations_models,
};
use crate::features::map::{dtos as map_dtos, handlers as map_handlers};
use crate::features::tours::{dtos as tours_dtos, handlers as tours_handlers, models as tours_models};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Locations
        locations_handlers::list_locations,
        locations_handlers::location_stats,
        locations_handlers::get_location,
        locations_handlers::create_location,
        locations_handlers::update_location,
        locations_handlers::delete_location,
        // Tours
        tours_handlers::list_tours,
        tours_handlers::tour_stats,
        tours_handlers::get_tour,
        tours_handlers::create_tour,
        tours_handlers::update_tour,
        tours_handlers::delete_tour,
        // Dashboard
        dashboard_handlers::get_summary,
        // Map
        map_handlers::get_map_state,
        map_handlers::set_filters,
        map_handlers::set_search,
        map_handlers::fly_to,
        map_handlers::linked_tours,
        map_handlers::gallery_index,
        map_handlers::save_credential,
        map_handlers::clear_credential,
        map_handlers::command_stream,
        map_handlers::engine_event,
    ),
    components(schemas(
        Meta,
        locations_models::Coordinates,
        locations_models::LocationKind,
        locations_models::LocationStatus,
        locations_dtos::CoordinatesDto,
        locations_dtos::CreateLocationDto,
        locations_dtos::UpdateLocationDto,
        locations_dtos::LocationResponseDto,
        locations_dtos::KindCountDto,
        locations_dtos::LocationStatsDto,
        tours_models::TourStatus,
        tours_dtos::CreateTourDto,
        tours_dtos::UpdateTourDto,
        tours_dtos::TourResponseDto,
        tours_dtos::TourStatsDto,
        dashboard_dtos::DashboardSummaryDto,
        map_dtos::MapPhaseDto,
        map_dtos::MapStateDto,
        map_dtos::SetFiltersDto,
        map_dtos::SearchDto,
        map_dtos::FlyToDto,
        map_dtos::CredentialDto,
        map_dtos::EngineEventKind,
        map_dtos::EngineEventDto,
        map_dtos::GalleryIndexDto,
    )),
    tags(
        (name = "locations", description = "Destination store"),
        (name = "tours", description = "Tour package store"),
        (name = "dashboard", description = "Admin dashboard summaries"),
        (name = "map", description = "Interactive map session, filters and tour linking"),
    )
)]
pub struct ApiDoc;

pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
