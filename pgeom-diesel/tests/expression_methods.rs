#![cfg(feature = "postgres")]

//! Verify that the per-type expression methods produce the same SQL as the
//! free functions in `pgeom_diesel::functions`, and that the operator
//! methods render the expected PostgreSQL operators.

use diesel::dsl::select;
use diesel::pg::Pg;
use diesel::sql_types::{Double, Nullable};
use pgeom_diesel::prelude::*;

macro_rules! pt {
    () => {
        diesel::dsl::sql::<Nullable<SqlPoint>>("p")
    };
}

macro_rules! seg {
    () => {
        diesel::dsl::sql::<Nullable<SqlLseg>>("s")
    };
}

macro_rules! bx {
    () => {
        diesel::dsl::sql::<Nullable<SqlBox>>("b")
    };
}

macro_rules! path {
    () => {
        diesel::dsl::sql::<Nullable<SqlPath>>("pa")
    };
}

macro_rules! poly {
    () => {
        diesel::dsl::sql::<Nullable<SqlPolygon>>("pg")
    };
}

macro_rules! circ {
    () => {
        diesel::dsl::sql::<Nullable<SqlCircle>>("c")
    };
}

fn sql_of<T>(query: T) -> String
where
    T: diesel::query_builder::QueryFragment<Pg>,
{
    diesel::debug_query::<Pg, _>(&query).to_string()
}

/// Assert method-style and function-style produce identical SQL.
macro_rules! assert_method_eq_func {
    ($method_expr:expr, $func_expr:expr) => {{
        assert_eq!(sql_of(select($method_expr)), sql_of(select($func_expr)));
    }};
}

// ── Functions ───────────────────────────────────────────────────────────────

#[test]
fn box_methods() {
    assert_method_eq_func!(bx!().area(), box_area(bx!()));
    assert_method_eq_func!(bx!().center(), box_center(bx!()));
    assert_method_eq_func!(bx!().height(), height(bx!()));
    assert_method_eq_func!(bx!().width(), width(bx!()));
    assert_method_eq_func!(bx!().diagonal(), diagonal(bx!()));
    assert_method_eq_func!(bx!().bound_box(bx!()), bound_box(bx!(), bx!()));
}

#[test]
fn lseg_methods() {
    assert_method_eq_func!(seg!().length(), lseg_length(seg!()));
}

#[test]
fn path_methods() {
    assert_method_eq_func!(path!().area(), path_area(path!()));
    assert_method_eq_func!(path!().length(), path_length(path!()));
    assert_method_eq_func!(path!().npoints(), path_npoints(path!()));
    assert_method_eq_func!(path!().isclosed(), isclosed(path!()));
    assert_method_eq_func!(path!().isopen(), isopen(path!()));
    assert_method_eq_func!(path!().pclose(), pclose(path!()));
    assert_method_eq_func!(path!().popen(), popen(path!()));
    assert_method_eq_func!(path!().to_polygon(), path_to_polygon(path!()));
}

#[test]
fn polygon_methods() {
    assert_method_eq_func!(poly!().npoints(), polygon_npoints(poly!()));
    assert_method_eq_func!(poly!().to_path(), polygon_to_path(poly!()));
}

#[test]
fn circle_methods() {
    assert_method_eq_func!(circ!().area(), circle_area(circ!()));
    assert_method_eq_func!(circ!().center(), circle_center(circ!()));
    assert_method_eq_func!(circ!().radius(), radius(circ!()));
    assert_method_eq_func!(circ!().diameter(), diameter(circ!()));
}

// ── SQL names ───────────────────────────────────────────────────────────────

#[test]
fn overloads_share_the_postgres_name() {
    assert!(sql_of(select(box_area(bx!()))).contains("area(b)"));
    assert!(sql_of(select(path_area(path!()))).contains("area(pa)"));
    assert!(sql_of(select(circle_area(circ!()))).contains("area(c)"));
    assert!(sql_of(select(lseg_length(seg!()))).contains("length(s)"));
    assert!(sql_of(select(polygon_npoints(poly!()))).contains("npoints(pg)"));
    assert!(sql_of(select(polygon_to_path(poly!()))).contains("path(pg)"));
}

#[test]
fn constructors_render_type_named_functions() {
    let one = || diesel::dsl::sql::<Double>("1");
    assert!(sql_of(select(make_point(one(), one()))).contains("point(1, 1)"));
    assert!(sql_of(select(make_box(pt!(), pt!()))).contains("box(p, p)"));
    assert!(sql_of(select(make_circle(pt!(), one()))).contains("circle(p, 1)"));
    assert!(sql_of(select(make_lseg(pt!(), pt!()))).contains("lseg(p, p)"));
}

// ── Operators ───────────────────────────────────────────────────────────────

#[test]
fn point_operators() {
    assert!(sql_of(select(pt!().distance(pt!()))).contains("p <-> p"));
    assert!(sql_of(select(pt!().same_as(pt!()))).contains("p ~= p"));
    assert!(sql_of(select(pt!().within_box(bx!()))).contains("p <@ b"));
    assert!(sql_of(select(pt!().within_polygon(poly!()))).contains("p <@ pg"));
    assert!(sql_of(select(pt!().within_circle(circ!()))).contains("p <@ c"));
}

#[test]
fn box_operators() {
    assert!(sql_of(select(bx!().contains_point(pt!()))).contains("b @> p"));
    assert!(sql_of(select(bx!().contains_box(bx!()))).contains("b @> b"));
    assert!(sql_of(select(bx!().within_box(bx!()))).contains("b <@ b"));
    assert!(sql_of(select(bx!().overlaps(bx!()))).contains("b && b"));
    assert!(sql_of(select(bx!().same_as(bx!()))).contains("b ~= b"));
}

#[test]
fn polygon_and_circle_operators() {
    assert!(sql_of(select(poly!().contains_point(pt!()))).contains("pg @> p"));
    assert!(sql_of(select(poly!().overlaps(poly!()))).contains("pg && pg"));
    assert!(sql_of(select(poly!().same_as(poly!()))).contains("pg ~= pg"));
    assert!(sql_of(select(circ!().contains_point(pt!()))).contains("c @> p"));
    assert!(sql_of(select(circ!().overlaps(circ!()))).contains("c && c"));
    assert!(sql_of(select(circ!().distance(circ!()))).contains("c <-> c"));
}

#[test]
fn bound_values_become_parameters() {
    let here = pgeom_core::Point::new(1.0, 2.0);
    let sql = sql_of(select(pt!().distance(Some(here))));
    assert!(sql.contains("p <-> $1"), "{sql}");
}
