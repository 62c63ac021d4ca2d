#![allow(dead_code)]

use serde_json::{json, Value};

pub fn person(id: u32, name: &str, mass: &str) -> Value {
    json!({
        "name": name,
        "height": "172",
        "mass": mass,
        "hair_color": "blond",
        "skin_color": "fair",
        "eye_color": "blue",
        "birth_year": "19BBY",
        "gender": "male",
        "homeworld": "https://swapi.info/api/planets/1",
        "films": ["https://swapi.info/api/films/1"],
        "species": [],
        "vehicles": [],
        "starships": [],
        "created": "2014-12-09T13:50:51.644000Z",
        "edited": "2014-12-20T21:17:56.891000Z",
        "url": format!("https://swapi.info/api/people/{id}")
    })
}

pub fn planet(id: u32, name: &str, population: &str) -> Value {
    json!({
        "name": name,
        "rotation_period": "23",
        "orbital_period": "304",
        "diameter": "10465",
        "climate": "arid",
        "gravity": "1 standard",
        "terrain": "desert",
        "surface_water": "1",
        "population": population,
        "residents": [],
        "films": [],
        "created": "2014-12-09T13:50:49.641000Z",
        "edited": "2014-12-20T20:58:18.411000Z",
        "url": format!("https://swapi.info/api/planets/{id}")
    })
}

/// Five upstream people, the fourth without a name.
pub fn people_with_one_nameless() -> Value {
    let mut nameless = person(4, "", "unknown");
    nameless.as_object_mut().unwrap().remove("name");

    json!([
        person(1, "Luke Skywalker", "77"),
        person(2, "Leia Organa", "49"),
        person(3, "Anakin Skywalker", "84"),
        nameless,
        person(5, "Jabba Desilijic Tiure", "1,358"),
    ])
}

pub fn planets() -> Value {
    json!([
        planet(1, "Tatooine", "200000"),
        planet(2, "Alderaan", "2000000000"),
        planet(3, "Yavin IV", "1000"),
        planet(4, "Hoth", "unknown"),
    ])
}
