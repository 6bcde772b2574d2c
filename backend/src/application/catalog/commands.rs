// Reference data: districts, categories, buildings and form auto-fill

pub mod districts;
pub mod categories;
pub mod list_buildings;
pub mod create_building;
pub mod update_building;
pub mod deactivate_building;
pub mod search_buildings;
pub mod lookup_address;
pub mod year_reference;
