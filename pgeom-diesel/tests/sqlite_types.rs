#![cfg(feature = "sqlite")]

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Nullable};
use pgeom_core::{Circle, Line, LineSegment, Path, PgBox, Point, Polygon};
use pgeom_diesel::types;

diesel::table! {
    shapes (id) {
        id -> Integer,
        pt -> Nullable<pgeom_diesel::Point>,
        ln -> Nullable<pgeom_diesel::Line>,
        seg -> Nullable<pgeom_diesel::Lseg>,
        bx -> Nullable<pgeom_diesel::PgBox>,
        pa -> Nullable<pgeom_diesel::Path>,
        pg -> Nullable<pgeom_diesel::Polygon>,
        ci -> Nullable<pgeom_diesel::Circle>,
    }
}

// ── Helper to create an in-memory connection ─────────────────────────────────

fn conn() -> SqliteConnection {
    let mut c = SqliteConnection::establish(":memory:").unwrap();
    diesel::sql_query(
        "CREATE TABLE shapes (
            id INTEGER PRIMARY KEY,
            pt TEXT, ln TEXT, seg TEXT, bx TEXT, pa TEXT, pg TEXT, ci TEXT
        )",
    )
    .execute(&mut c)
    .unwrap();
    c
}

#[derive(QueryableByName, Debug)]
struct StoredText {
    #[diesel(sql_type = Nullable<diesel::sql_types::Text>)]
    pt: Option<String>,
}

#[derive(QueryableByName, Debug)]
struct PointRow {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Nullable<types::Point>)]
    pt: Option<Point>,
}

fn square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 4.0),
        Point::new(4.0, 4.0),
        Point::new(4.0, 0.0),
    ]
}

// ── Value roundtrips ─────────────────────────────────────────────────────────

#[test]
fn every_type_roundtrips_through_a_row() {
    let mut c = conn();

    let point = Point::new(1.5, -2.0);
    let line = Line::new(1.0, -1.0, 0.5).unwrap();
    let lseg = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    let bx = PgBox::new(Point::new(0.0, 0.0), Point::new(2.0, 3.0));
    let path = Path::open(square()).unwrap();
    let polygon = Polygon::new(square()).unwrap();
    let circle = Circle::from_coords(1.0, 1.0, 2.5).unwrap();

    diesel::insert_into(shapes::table)
        .values((
            shapes::id.eq(1),
            shapes::pt.eq(Some(point)),
            shapes::ln.eq(Some(line)),
            shapes::seg.eq(Some(lseg)),
            shapes::bx.eq(Some(bx)),
            shapes::pa.eq(Some(path.clone())),
            shapes::pg.eq(Some(polygon.clone())),
            shapes::ci.eq(Some(circle)),
        ))
        .execute(&mut c)
        .unwrap();

    let row: (
        Option<Point>,
        Option<Line>,
        Option<LineSegment>,
        Option<PgBox>,
        Option<Path>,
        Option<Polygon>,
        Option<Circle>,
    ) = shapes::table
        .find(1)
        .select((
            shapes::pt,
            shapes::ln,
            shapes::seg,
            shapes::bx,
            shapes::pa,
            shapes::pg,
            shapes::ci,
        ))
        .first(&mut c)
        .unwrap();

    assert_eq!(row.0, Some(point));
    assert_eq!(row.1, Some(line));
    assert_eq!(row.2, Some(lseg));
    assert_eq!(row.3, Some(bx));
    assert_eq!(row.4, Some(path));
    assert_eq!(row.5, Some(polygon));
    assert_eq!(row.6, Some(circle));
}

#[test]
fn values_are_stored_as_postgres_text() {
    let mut c = conn();

    diesel::insert_into(shapes::table)
        .values((shapes::id.eq(1), shapes::pt.eq(Some(Point::new(1.0, 2.5)))))
        .execute(&mut c)
        .unwrap();

    let row: StoredText = sql_query("SELECT pt FROM shapes WHERE id = 1")
        .get_result(&mut c)
        .unwrap();
    assert_eq!(row.pt.as_deref(), Some("(1,2.5)"));
}

#[test]
fn null_maps_to_none() {
    let mut c = conn();

    diesel::insert_into(shapes::table)
        .values((shapes::id.eq(1), shapes::pt.eq(None::<Point>)))
        .execute(&mut c)
        .unwrap();

    let pt: Option<Point> = shapes::table
        .find(1)
        .select(shapes::pt)
        .first(&mut c)
        .unwrap();
    assert_eq!(pt, None);
}

#[test]
fn text_written_by_hand_is_parsed() {
    let mut c = conn();

    sql_query("INSERT INTO shapes (id, pt) VALUES (1, ' ( 3 , 4 ) ')")
        .execute(&mut c)
        .unwrap();

    let row: PointRow = sql_query("SELECT id, pt FROM shapes WHERE id = 1")
        .get_result(&mut c)
        .unwrap();
    assert_eq!(row.id, 1);
    assert_eq!(row.pt, Some(Point::new(3.0, 4.0)));
}

#[test]
fn bound_parameter_roundtrip() {
    let mut c = conn();
    let circle = Circle::from_radius(7.0).unwrap();

    sql_query("INSERT INTO shapes (id, ci) VALUES (1, ?)")
        .bind::<types::Circle, _>(&circle)
        .execute(&mut c)
        .unwrap();

    let ci: Option<Circle> = shapes::table
        .find(1)
        .select(shapes::ci)
        .first(&mut c)
        .unwrap();
    assert_eq!(ci, Some(circle));
}

// ── Decode failures ──────────────────────────────────────────────────────────

#[test]
fn malformed_stored_text_is_an_error() {
    let mut c = conn();

    sql_query("INSERT INTO shapes (id, pt) VALUES (1, 'not a point')")
        .execute(&mut c)
        .unwrap();

    let result: QueryResult<Option<Point>> = shapes::table.find(1).select(shapes::pt).first(&mut c);
    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("invalid input syntax for type point"),
        "unexpected error: {err}"
    );
}

#[test]
fn short_paths_read_back_but_are_not_written() {
    let mut c = conn();

    sql_query("INSERT INTO shapes (id, pa, pg) VALUES (1, '[(1,1)]', '((1,1))')")
        .execute(&mut c)
        .unwrap();

    let (pa, pg): (Option<Path>, Option<Polygon>) = shapes::table
        .find(1)
        .select((shapes::pa, shapes::pg))
        .first(&mut c)
        .unwrap();
    let pa = pa.expect("path should not be NULL");
    let pg = pg.expect("polygon should not be NULL");
    assert_eq!(pa.points(), &[Point::new(1.0, 1.0)]);
    assert!(!pa.is_closed());
    assert_eq!(pg.points(), &[Point::new(1.0, 1.0)]);

    let result = diesel::insert_into(shapes::table)
        .values((shapes::id.eq(2), shapes::pa.eq(Some(pa))))
        .execute(&mut c);
    assert!(result.is_err());

    let result = diesel::insert_into(shapes::table)
        .values((shapes::id.eq(3), shapes::pg.eq(Some(pg))))
        .execute(&mut c);
    assert!(result.is_err());
}

#[test]
fn nan_box_corner_survives_storage() {
    let mut c = conn();
    let bx: PgBox = "(NaN,2),(2,1)".parse().unwrap();

    diesel::insert_into(shapes::table)
        .values((shapes::id.eq(1), shapes::bx.eq(Some(bx))))
        .execute(&mut c)
        .unwrap();

    let back: Option<PgBox> = shapes::table
        .find(1)
        .select(shapes::bx)
        .first(&mut c)
        .unwrap();
    let back = back.expect("box should not be NULL");
    assert_eq!(back.to_string(), "(NaN,2),(2,1)");
}

// ── geo types ────────────────────────────────────────────────────────────────

#[test]
fn geo_values_share_the_columns() {
    let mut c = conn();

    let point = geo::Point::new(3.5, 7.25);
    let rect = geo::Rect::new(geo::coord! { x: 0.0, y: 0.0 }, geo::coord! { x: 2.0, y: 1.0 });
    let segment = geo::Line::new(geo::coord! { x: 0.0, y: 0.0 }, geo::coord! { x: 1.0, y: 1.0 });
    let polygon = geo::Polygon::new(
        geo::LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]),
        vec![],
    );

    diesel::insert_into(shapes::table)
        .values((
            shapes::id.eq(1),
            shapes::pt.eq(Some(point)),
            shapes::bx.eq(Some(rect)),
            shapes::seg.eq(Some(segment)),
            shapes::pg.eq(Some(polygon.clone())),
        ))
        .execute(&mut c)
        .unwrap();

    let row: (
        Option<geo::Point<f64>>,
        Option<geo::Rect<f64>>,
        Option<geo::Line<f64>>,
        Option<geo::Polygon<f64>>,
    ) = shapes::table
        .find(1)
        .select((shapes::pt, shapes::bx, shapes::seg, shapes::pg))
        .first(&mut c)
        .unwrap();

    assert_eq!(row.0, Some(point));
    assert_eq!(row.1, Some(rect));
    assert_eq!(row.2, Some(segment));
    assert_eq!(row.3, Some(polygon));

    // The same rows read back as pgeom values.
    let bx: Option<PgBox> = shapes::table
        .find(1)
        .select(shapes::bx)
        .first(&mut c)
        .unwrap();
    assert_eq!(bx, Some(PgBox::new(Point::new(2.0, 1.0), Point::new(0.0, 0.0))));
}

#[test]
fn geo_polygon_with_hole_is_rejected_on_write() {
    let mut c = conn();

    let polygon = geo::Polygon::new(
        geo::LineString::from(vec![(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (0.0, 0.0)]),
        vec![geo::LineString::from(vec![
            (1.0, 1.0),
            (1.0, 2.0),
            (2.0, 2.0),
            (1.0, 1.0),
        ])],
    );

    let result = diesel::insert_into(shapes::table)
        .values((shapes::id.eq(1), shapes::pg.eq(Some(polygon))))
        .execute(&mut c);
    assert!(result.is_err());
}
