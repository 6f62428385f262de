use criterion::{Criterion, black_box, criterion_group, criterion_main};
use readable_expr::{
    BinaryOp, Expr, Label, MethodInfo, TranslationSettings, Type, UnaryOp, Variable, translate,
};

/// `a => a.Append("0").Append("1")...` with `links` calls.
fn call_chain(links: usize) -> Expr {
    let builder = Type::named("System.Text", "StringBuilder");
    let sb = Variable::new("sb", builder.clone());
    let append = MethodInfo::instance(builder.clone(), "Append")
        .param("value", Type::string())
        .returns(builder);
    let chain = (0..links).fold(Expr::variable(&sb), |subject, i| {
        Expr::call(subject, append.clone(), [Expr::constant(i.to_string())])
    });
    Expr::lambda(&[sb], chain)
}

/// Left-nested sum `i + 0 + 1 + ...`, checked every third operation.
fn arithmetic(terms: i32) -> Expr {
    let i = Variable::new("i", Type::int());
    let sum = (0..terms).fold(Expr::variable(&i), |sum, n| {
        let op = if n % 3 == 0 {
            BinaryOp::AddChecked
        } else {
            BinaryOp::Add
        };
        Expr::binary(op, sum, Expr::constant(n))
    });
    Expr::lambda(&[i], sum)
}

/// A loop whose body holds `statements` guarded increments.
fn loop_body(statements: usize) -> Expr {
    let i = Variable::new("i", Type::int());
    let done = Label::new();
    let mut body = vec![Expr::if_then(
        Expr::greater_than(Expr::variable(&i), Expr::constant(100)),
        Expr::break_to(&done),
    )];
    body.extend((0..statements).map(|_| Expr::unary(UnaryOp::Increment, Expr::variable(&i))));
    Expr::loop_with(Some(Expr::block(body).into()), Some(&done), None)
}

fn bench_translate(c: &mut Criterion) {
    let settings = TranslationSettings::default();
    let cases = [
        ("translate_call_chain_50", call_chain(50)),
        ("translate_arithmetic_200", arithmetic(200)),
        ("translate_loop_100", loop_body(100)),
    ];
    for (name, tree) in &cases {
        c.bench_function(name, |b| {
            b.iter(|| {
                let text = translate(black_box(tree), &settings).expect("translate");
                black_box(text);
            })
        });
    }
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
