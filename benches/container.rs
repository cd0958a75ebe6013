#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use service_container::{Container, Services as _};
use std::sync::Arc;

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA;

#[inline]
fn container_with_bindings(shared: bool) -> Container {
    let container = Container::new();
    container.bind("caa", |_| Ok(CAA), shared).unwrap();
    container
        .bind("ca", |container| Ok(CA(container.make("caa")?)), shared)
        .unwrap();
    container
        .bind("c", |container| Ok(C(container.make("ca")?)), shared)
        .unwrap();
    container.bind("b", |_| Ok(B(2)), shared).unwrap();
    container
        .bind("a", |container| Ok(A(container.make("b")?, container.make("c")?)), shared)
        .unwrap();
    container
}

#[inline]
fn container_get(container: &Container) {
    let _ = container.get::<A>("a").unwrap().unwrap();
}

#[inline]
fn namespace_get(container: &Container) {
    let _ = container.namespace("app").unwrap().get::<B>("b").unwrap().unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let transient = container_with_bindings(false);
    let shared = container_with_bindings(true);

    let namespaced = Container::new();
    namespaced.set("app.b", B(2)).unwrap();

    c.bench_function("container_new_with_bindings", |b| b.iter(|| container_with_bindings(false)))
        .bench_function("container_get_transient", |b| b.iter(|| container_get(&transient)))
        .bench_function("container_get_shared", |b| b.iter(|| container_get(&shared)))
        .bench_function("namespace_get", |b| b.iter(|| namespace_get(&namespaced)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
