// src/geos.rs

/// Madrid districts and their neighbourhoods, as named in the listings
/// dataset and the neighbourhood boundary file. Feeds the host form selects
/// and the map highlighting; the district names double as the one-hot
/// category labels.
pub const MADRID_DISTRICTS: [(&str, &[&str]); 20] = [
    (
        "Barajas",
        &["Alameda de Osuna", "Aeropuerto", "Casco Histórico de Barajas", "Timón", "Corralejos"],
    ),
    (
        "Carabanchel",
        &["Comillas", "Opañel", "San Isidro", "Vista Alegre", "Puerta Bonita", "Buenavista", "Abrantes"],
    ),
    (
        "Centro",
        &["Sol", "Palacio", "Embajadores", "Cortes", "Justicia", "Universidad"],
    ),
    (
        "Chamartín",
        &["El Viso", "Prosperidad", "Ciudad Jardín", "Hispanoamérica", "Nueva España", "Castilla"],
    ),
    (
        "Chamberí",
        &["Gaztambide", "Arapiles", "Trafalgar", "Almagro", "Ríos Rosas", "Vallehermoso"],
    ),
    (
        "Ciudad Lineal",
        &["Ventas", "Pueblo Nuevo", "Quintana", "Concepción", "San Pascual", "San Juan Bautista", "Colina", "Atalaya", "Costillares"],
    ),
    (
        "Fuencarral - El Pardo",
        &["El Pardo", "Fuentelarreina", "Peñagrande", "Pilar", "La Paz", "Valverde", "Mirasierra", "El Goloso"],
    ),
    (
        "Hortaleza",
        &["Palomas", "Piovera", "Canillas", "Pinar del Rey", "Apóstol Santiago", "Valdefuentes"],
    ),
    (
        "Latina",
        &["Los Cármenes", "Puerta del Ángel", "Lucero", "Aluche", "Campamento", "Cuatro Vientos", "Águilas"],
    ),
    (
        "Moncloa - Aravaca",
        &["Casa de Campo", "Argüelles", "Ciudad Universitaria", "Valdezarza", "Valdemarín", "El Plantío", "Aravaca"],
    ),
    (
        "Moratalaz",
        &["Pavones", "Horcajo", "Marroquina", "Media Legua", "Fontarrón", "Vinateros"],
    ),
    (
        "Puente de Vallecas",
        &["Entrevías", "San Diego", "Palomeras Bajas", "Palomeras Sureste", "Portazgo", "Numancia"],
    ),
    (
        "Retiro",
        &["Pacífico", "Adelfas", "Estrella", "Ibiza", "Jerónimos", "Niño Jesús"],
    ),
    (
        "Salamanca",
        &["Recoletos", "Goya", "Fuente del Berro", "Guindalera", "Lista", "Castellana"],
    ),
    (
        "San Blas - Canillejas",
        &["Simancas", "Hellín", "Amposta", "Arcos", "Rosas", "Rejas", "Canillejas", "Salvador"],
    ),
    (
        "Tetuán",
        &["Bellas Vistas", "Cuatro Caminos", "Castillejos", "Almenara", "Valdeacederas", "Berruguete"],
    ),
    (
        "Usera",
        &["Orcasitas", "Orcasur", "San Fermín", "Almendrales", "Moscardó", "Zofío", "Pradolongo"],
    ),
    (
        "Vicálvaro",
        &["Casco Histórico de Vicálvaro", "Valdebernardo", "Valderrivas", "El Cañaveral"],
    ),
    (
        "Villa de Vallecas",
        &["Casco Histórico de Vallecas", "Santa Eugenia", "Ensanche de Vallecas"],
    ),
    (
        "Villaverde",
        &["San Andrés", "San Cristóbal", "Butarque", "Los Rosales", "Los Ángeles"],
    ),
];

pub fn neighbourhoods_of(district: &str) -> &'static [&'static str] {
    MADRID_DISTRICTS
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, hoods)| *hoods)
        .unwrap_or(&[])
}
